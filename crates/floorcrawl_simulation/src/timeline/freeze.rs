//! Global pause gate
//!
//! Пока симуляция заморожена, не работает ни один gameplay system и не
//! исполняется ни одно отложенное действие (они ждут в очереди).
//!
//! `GameClock` во время заморозки продолжает идти: перезарядка или кулдаун,
//! чей срок истёк внутри паузы, завершается на первом тике после снятия.

use bevy::prelude::*;

use super::GameClock;

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationFreeze {
    /// Ручная пауза хоста (меню)
    paused: bool,
    /// Таймерная заморозка (отсчёт на старте уровня)
    until_ms: Option<u64>,
    /// Постоянная остановка (смерть игрока), снимается только `reset`
    halted: bool,
}

impl SimulationFreeze {
    pub fn is_frozen(&self) -> bool {
        self.paused || self.halted || self.until_ms.is_some()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Заморозить до момента `until_ms` (продлевает, но не укорачивает)
    pub fn freeze_until(&mut self, until_ms: u64) {
        self.until_ms = Some(self.until_ms.map_or(until_ms, |current| current.max(until_ms)));
    }

    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Снимает таймерную заморозку если время пришло
    pub fn release_expired(&mut self, now_ms: u64) -> bool {
        match self.until_ms {
            Some(until) if now_ms >= until => {
                self.until_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// System: снятие таймерной заморозки (работает и во время паузы)
pub fn release_timed_freeze(clock: Res<GameClock>, mut freeze: ResMut<SimulationFreeze>) {
    if freeze.release_expired(clock.now_ms()) {
        crate::logger::log_info(&format!("▶️ Countdown finished at {} ms, simulation resumed", clock.now_ms()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_freeze_releases() {
        let mut freeze = SimulationFreeze::default();
        assert!(!freeze.is_frozen());

        freeze.freeze_until(3000);
        assert!(freeze.is_frozen());
        assert!(!freeze.release_expired(2999));
        assert!(freeze.release_expired(3000));
        assert!(!freeze.is_frozen());
    }

    #[test]
    fn test_freeze_until_never_shortens() {
        let mut freeze = SimulationFreeze::default();
        freeze.freeze_until(3000);
        freeze.freeze_until(1000);
        assert!(!freeze.release_expired(2000));
        assert!(freeze.release_expired(3000));
    }

    #[test]
    fn test_halt_survives_resume() {
        let mut freeze = SimulationFreeze::default();
        freeze.halt();
        freeze.resume();
        assert!(freeze.is_frozen());

        freeze.reset();
        assert!(!freeze.is_frozen());
    }
}
