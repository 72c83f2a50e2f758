//! Варианты врагов: тег + stat block + стратегия (без иерархии классов)
//!
//! Поведение варианта = `MovementRule` (как двигаться к/от цели) +
//! `AttackRule` (чем бить, когда цель в радиусе). Числа берутся из конфига.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тег варианта врага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum HostileVariant {
    /// Дефолтный враг: подходит и бьёт без выпада
    Brute,
    Melee,
    Ranged,
}

impl HostileVariant {
    pub const ALL: [HostileVariant; 3] = [HostileVariant::Brute, HostileVariant::Melee, HostileVariant::Ranged];

    pub fn name(&self) -> &'static str {
        match self {
            HostileVariant::Brute => "brute",
            HostileVariant::Melee => "melee",
            HostileVariant::Ranged => "ranged",
        }
    }
}

/// Правило движения относительно цели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum MovementRule {
    /// Идти к цели пока дистанция > attack_range, затем стоять
    Advance,
    /// Держать полосу [range/2, range]: ближе отступать, дальше подходить
    KeepBand,
}

/// Правило атаки (срабатывает на cooldown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum AttackRule {
    /// Мгновенный удар по цели
    Strike,
    /// Удар + выпад к цели и обратно (tween позиции)
    Lunge { duration_ms: u64 },
    /// Выстрел из своего оружия
    Shoot,
}

/// Stat block + стратегия одного варианта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantProfile {
    pub max_health: u32,
    pub speed: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u64,
    pub attack_damage: u32,
    pub movement: MovementRule,
    pub attack: AttackRule,
}

/// Компонент врага
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hostile {
    pub variant: HostileVariant,
    pub movement: MovementRule,
    pub attack: AttackRule,
}

impl Hostile {
    pub fn from_profile(variant: HostileVariant, profile: &VariantProfile) -> Self {
        Self {
            variant,
            movement: profile.movement,
            attack: profile.attack,
        }
    }

    /// Намерение на этот тик: скорость + "цель в радиусе атаки"
    pub fn compute_intent(&self, position: Vec2, target: Vec2, speed: f32, attack_range: f32) -> HostileIntent {
        let distance = position.distance(target);
        let toward = (target - position).normalize_or_zero();

        let velocity = match self.movement {
            MovementRule::Advance => {
                if distance > attack_range {
                    toward * speed
                } else {
                    Vec2::ZERO
                }
            }
            MovementRule::KeepBand => {
                if distance < attack_range / 2.0 {
                    -toward * speed
                } else if distance > attack_range {
                    toward * speed
                } else {
                    Vec2::ZERO
                }
            }
        };

        // Стрелок стреляет и на отходе, но строго внутри радиуса
        let in_attack_range = match self.attack {
            AttackRule::Shoot => distance < attack_range,
            AttackRule::Strike | AttackRule::Lunge { .. } => distance <= attack_range,
        };

        HostileIntent {
            velocity,
            in_attack_range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileIntent {
    pub velocity: Vec2,
    pub in_attack_range: bool,
}

/// Активный выпад melee врага (позиция интерполируется к цели и обратно)
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Lunge {
    pub origin: Vec2,
    pub target: Vec2,
    pub started_ms: u64,
    pub duration_ms: u64,
}

impl Lunge {
    /// Позиция в момент `now_ms`; None когда выпад закончен
    pub fn position_at(&self, now_ms: u64) -> Option<Vec2> {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        if self.duration_ms == 0 || elapsed >= self.duration_ms {
            return None;
        }

        // yoyo: первая половина туда, вторая обратно
        let half = self.duration_ms as f32 / 2.0;
        let t = elapsed as f32 / half;
        let reach = if t <= 1.0 { t } else { 2.0 - t };
        Some(self.origin.lerp(self.target, reach))
    }
}
