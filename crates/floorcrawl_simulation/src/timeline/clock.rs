//! Игровые часы и вход тика от хоста

use bevy::prelude::*;

/// Вход одного тика (пишет хост перед `App::update()`)
///
/// `reload_requested` / `pickup_requested` edge-triggered: симуляция
/// сбрасывает их после обработки, как JustDown у клавиши.
#[derive(Resource, Debug, Clone, Default)]
pub struct TickInput {
    /// Монотонное время хоста (мс)
    pub now_ms: u64,
    /// Намерение движения (WASD), не обязательно нормализовано
    pub movement: Vec2,
    /// Точка прицела игрока (мировые координаты)
    pub aim_target: Vec2,
    /// Курок зажат (auto-fire пока держится)
    pub trigger_held: bool,
    pub reload_requested: bool,
    pub pickup_requested: bool,
}

/// Монотонные часы симуляции
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    now_ms: u64,
    delta_ms: u64,
    started: bool,
}

impl GameClock {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn delta_ms(&self) -> u64 {
        self.delta_ms
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta_ms as f32 / 1000.0
    }

    /// Продвигает часы; время назад игнорируется (возвращает false)
    pub fn advance_to(&mut self, now_ms: u64) -> bool {
        if !self.started {
            self.started = true;
            self.now_ms = now_ms;
            self.delta_ms = 0;
            return true;
        }

        if now_ms < self.now_ms {
            self.delta_ms = 0;
            return false;
        }

        self.delta_ms = now_ms - self.now_ms;
        self.now_ms = now_ms;
        true
    }
}

/// System: TickInput.now_ms → GameClock
pub fn sync_clock(input: Res<TickInput>, mut clock: ResMut<GameClock>) {
    if !clock.advance_to(input.now_ms) {
        crate::logger::log_warning(&format!(
            "⏪ Non-monotonic tick time {} < {} ignored",
            input.now_ms,
            clock.now_ms()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_first_tick_has_zero_delta() {
        let mut clock = GameClock::default();
        assert!(clock.advance_to(500));
        assert_eq!(clock.now_ms(), 500);
        assert_eq!(clock.delta_ms(), 0);
    }

    #[test]
    fn test_clock_rejects_time_going_backwards() {
        let mut clock = GameClock::default();
        clock.advance_to(100);
        clock.advance_to(150);
        assert_eq!(clock.delta_ms(), 50);
        assert_eq!(clock.delta_secs(), 0.05);

        assert!(!clock.advance_to(120));
        assert_eq!(clock.now_ms(), 150);
        assert_eq!(clock.delta_ms(), 0);
    }
}
