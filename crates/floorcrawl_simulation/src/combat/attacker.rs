//! Attacker component: характеристики атакующего врага
//!
//! Cooldown считается по GameClock (мс), без тикающих таймеров:
//! атака разрешена когда `now - last_attack > attack_cooldown`.

use bevy::prelude::*;

/// Attacker: компонент для врагов (у игрока вместо него Weapon)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Attacker {
    /// Урон удара (или пули для стрелка)
    pub base_damage: u32,

    /// Cooldown между атаками (мс)
    pub attack_cooldown_ms: u64,

    /// Радиус атаки
    pub attack_range: f32,

    /// Время последней атаки (None = ещё не атаковал)
    pub last_attack_ms: Option<u64>,
}

impl Default for Attacker {
    fn default() -> Self {
        Self {
            base_damage: 10,
            attack_cooldown_ms: 1000,
            attack_range: 50.0,
            last_attack_ms: None,
        }
    }
}

impl Attacker {
    /// Может ли атаковать (cooldown строго истёк)
    ///
    /// `last_attack_ms` может лежать в будущем (задержка первого выстрела),
    /// тогда атака запрещена.
    pub fn can_attack(&self, now_ms: u64) -> bool {
        match self.last_attack_ms {
            None => true,
            Some(last) => now_ms
                .checked_sub(last)
                .is_some_and(|elapsed| elapsed > self.attack_cooldown_ms),
        }
    }

    /// Начать атаку (запомнить время)
    pub fn start_attack(&mut self, now_ms: u64) {
        self.last_attack_ms = Some(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacker_cooldown() {
        let mut attacker = Attacker::default();
        assert!(attacker.can_attack(0));

        attacker.start_attack(500);
        assert!(!attacker.can_attack(1000));
        // Строго больше cooldown
        assert!(!attacker.can_attack(1500));
        assert!(attacker.can_attack(1501));
    }

    #[test]
    fn test_attack_gate_in_future_blocks() {
        let attacker = Attacker {
            last_attack_ms: Some(2000),
            attack_cooldown_ms: 2000,
            ..Default::default()
        };

        assert!(!attacker.can_attack(0));
        assert!(!attacker.can_attack(4000));
        assert!(attacker.can_attack(4001));
    }
}
