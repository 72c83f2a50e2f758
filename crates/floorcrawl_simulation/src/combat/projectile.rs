//! Projectile: короткоживущий снаряд с фракцией
//!
//! Уничтожается на первом попадании ИЛИ по истечении lifespan, никогда
//! дважды. `active` переключается ровно один раз (`try_consume`).

use bevy::prelude::*;

use crate::components::{Faction, LevelEntity, Position, Velocity};
use crate::timeline::DeferredHandle;

#[derive(Component, Debug, Clone)]
#[require(Position, Velocity, LevelEntity)]
pub struct Projectile {
    /// Фракция владельца на момент выстрела (не меняется)
    faction: Faction,
    pub damage: u32,
    pub shooter: Option<Entity>,
    pub weapon: Entity,
    pub spawned_ms: u64,
    pub lifespan_ms: u64,
    pub radius: f32,
    active: bool,
    /// Запланированное самоуничтожение (отменяется при попадании)
    pub expiry: Option<DeferredHandle>,
}

impl Projectile {
    pub fn new(faction: Faction, damage: u32, weapon: Entity, spawned_ms: u64, lifespan_ms: u64) -> Self {
        Self {
            faction,
            damage,
            shooter: None,
            weapon,
            spawned_ms,
            lifespan_ms,
            radius: 4.0,
            active: true,
            expiry: None,
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Деактивировать. true только при первом вызове (попадание XOR истечение)
    pub fn try_consume(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }

    /// Может ли снаряд повредить актора этой фракции (без friendly fire)
    pub fn can_damage(&self, target: Faction) -> bool {
        self.active && self.faction.is_opposed_to(target)
    }

    pub fn expires_at(&self) -> u64 {
        self.spawned_ms.saturating_add(self.lifespan_ms)
    }
}

/// Почему снаряд исчез (для хоста: эффекты попадания)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileFate {
    HitActor(Entity),
    HitProp(Entity),
    HitWall,
    Expired,
}

/// Event: снаряд уничтожен
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileDestroyed {
    pub projectile: Entity,
    pub position: Vec2,
    pub fate: ProjectileFate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_consumed_once() {
        let mut projectile = Projectile::new(Faction::Player, 10, Entity::PLACEHOLDER, 0, 1000);

        assert!(projectile.try_consume());
        assert!(!projectile.is_active());
        assert!(!projectile.try_consume());
    }

    #[test]
    fn test_projectile_ignores_same_faction() {
        let projectile = Projectile::new(Faction::Hostile, 15, Entity::PLACEHOLDER, 0, 1000);

        assert!(projectile.can_damage(Faction::Player));
        assert!(!projectile.can_damage(Faction::Hostile));
    }

    #[test]
    fn test_inactive_projectile_cannot_damage() {
        let mut projectile = Projectile::new(Faction::Player, 10, Entity::PLACEHOLDER, 500, 1000);
        assert_eq!(projectile.expires_at(), 1500);

        projectile.try_consume();
        assert!(!projectile.can_damage(Faction::Hostile));
    }
}
