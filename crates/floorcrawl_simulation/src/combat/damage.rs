//! Damage events: намерения урона, применённый урон, смерть, лут

use bevy::prelude::*;

use crate::ai::HostileVariant;
use crate::components::Faction;

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum DamageSource {
    Projectile,
    /// Удар врага (brute/melee)
    Strike,
    Explosion,
}

/// Event: урон должен быть применён (применяет `apply_damage` в Resolution)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageIntent {
    pub target: Entity,
    pub amount: u32,
    pub source: DamageSource,
    /// Стрелок / враг / ящик
    pub instigator: Option<Entity>,
}

/// Событие: урон нанесен
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub source: DamageSource,
    /// Запрошенный урон
    pub damage: u32,
    /// Фактически снятое здоровье (overkill обрезается)
    pub applied: u32,
}

/// Event: HUD полоска здоровья
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: u32,
    pub max: u32,
}

/// Событие: актор умер (ровно один раз, при входе в Dead)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorDied {
    pub entity: Entity,
    pub faction: Faction,
    pub variant: Option<HostileVariant>,
    pub position: Vec2,
}

/// Event: враг оставил валюту
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CurrencyAwarded {
    pub source: Entity,
    pub drops: u32,
    /// Ценность одной монеты
    pub value_per_drop: u32,
    pub position: Vec2,
}

impl CurrencyAwarded {
    pub fn total(&self) -> u32 {
        self.drops * self.value_per_drop
    }
}

/// Event: выход с уровня открыт (последний враг убит)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LevelExitAvailable {
    pub exit: Entity,
    pub position: Vec2,
}
