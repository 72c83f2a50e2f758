//! Базовые компоненты акторов: Actor, Faction, Health, EquippedWeapon

use bevy::prelude::*;

use crate::ai::ActorState;
use crate::components::{LevelEntity, MovementSpeed, Position, Velocity};

/// Актор (игрок или враг), базовый компонент для живых существ
///
/// Автоматически добавляет Health, Position, Velocity, ActorState и слот оружия
/// через Required Components.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Health, Position, Velocity, MovementSpeed, ActorState, EquippedWeapon, LevelEntity)]
pub struct Actor {
    pub faction: Faction,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            faction: Faction::Hostile,
        }
    }
}

/// Фракция: фильтр для коллизий (friendly fire отсутствует)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Faction {
    Player,
    Hostile,
}

impl Faction {
    /// Снаряд этой фракции наносит урон актору `other`
    pub fn is_opposed_to(self, other: Faction) -> bool {
        self != other
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max, max > 0
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Возвращает фактически снятое здоровье
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current);
        self.current -= applied;
        applied
    }
}

/// Слот оружия актора: не больше одного оружия одновременно
///
/// Само оружие: отдельная entity с `Weapon`, переживает drop/pickup.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon {
    pub weapon: Option<Entity>,
}

/// Короткое окно "вспышки" после получения урона (для рендера)
///
/// Снимается отложенным `DeferredAction::HitFlashEnd`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitFlash {
    pub until_ms: u64,
}
