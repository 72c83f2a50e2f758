//! Session: состояние забега между этажами
//!
//! Никакого глобального реестра: хост передаёт `SessionState` в `begin_level`
//! и получает обновлённое значение из `finish_level`. Сохранение на диск
//! (рекорд, карта) на стороне хоста.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SimulationSet;

pub mod systems;

pub use systems::{collect_currency, detect_level_exit};

/// Прогресс забега (сериализуется хостом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub floor_level: u32,
    pub best_floor: u32,
    pub currency: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            floor_level: 1,
            best_floor: 1,
            currency: 0,
        }
    }
}

impl SessionState {
    /// Применить итог уровня
    ///
    /// Пройден → следующий этаж, рекорд растёт. Смерть → снова этаж 1, рекорд
    /// остаётся. Собранная валюта засчитывается в обоих случаях.
    pub fn apply(&self, outcome: LevelOutcome, currency_collected: u32) -> SessionState {
        let mut next = *self;
        match outcome {
            LevelOutcome::Cleared { floor } => {
                next.floor_level = floor.saturating_add(1);
                next.best_floor = next.best_floor.max(next.floor_level);
                next.currency = next.currency.saturating_add(currency_collected);
            }
            LevelOutcome::PlayerDied { .. } => {
                next.floor_level = 1;
                next.currency = next.currency.saturating_add(currency_collected);
            }
            LevelOutcome::Abandoned { .. } => {}
        }
        next
    }
}

/// Итог уровня
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelOutcome {
    /// Игрок дошёл до выхода
    Cleared { floor: u32 },
    PlayerDied { floor: u32 },
    /// Уровень завершён хостом до исхода (выход в меню)
    Abandoned { floor: u32 },
}

/// Сессия, с которой стартовал текущий уровень
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ActiveSession(pub SessionState);

/// Запрос старта уровня (потребляет `spawn::spawn_level`)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLevelStart {
    pub floor_level: u32,
}

/// Прогресс текущего уровня
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LevelProgress {
    pub floor_level: u32,
    pub player: Option<Entity>,
    /// Выход (появляется один раз, когда убит последний враг)
    pub exit: Option<Entity>,
    pub cleared: bool,
    pub player_dead: bool,
    pub currency_collected: u32,
    pub hostiles_killed: u32,
}

impl LevelProgress {
    pub fn new(floor_level: u32) -> Self {
        Self {
            floor_level,
            ..Default::default()
        }
    }

    pub fn outcome(&self) -> LevelOutcome {
        let floor = self.floor_level;
        if self.player_dead {
            LevelOutcome::PlayerDied { floor }
        } else if self.cleared {
            LevelOutcome::Cleared { floor }
        } else {
            LevelOutcome::Abandoned { floor }
        }
    }
}

/// Event: игрок подобрал валюту
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyCollected {
    pub pickup: Entity,
    pub value: u32,
    /// Собрано за уровень
    pub level_total: u32,
}

/// Event: этаж пройден (игрок на выходе), ровно один раз за уровень
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorCleared {
    pub floor: u32,
}

/// Начать уровень для `session.floor_level`
///
/// Сносит все entity прошлого уровня, очищает очередь отложенных действий и
/// снимает заморозки. Сами entity создаёт `spawn_level` на ближайшем тике.
pub fn begin_level(world: &mut World, session: SessionState) {
    let floor_level = session.floor_level.max(1);

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, With<crate::components::LevelEntity>>()
        .iter(world)
        .collect();
    for entity in &stale {
        world.despawn(*entity);
    }

    if let Some(mut queue) = world.get_resource_mut::<crate::timeline::DeferredQueue>() {
        queue.clear();
    }
    if let Some(mut freeze) = world.get_resource_mut::<crate::timeline::SimulationFreeze>() {
        freeze.reset();
    }

    world.insert_resource(ActiveSession(SessionState {
        floor_level,
        ..session
    }));
    world.insert_resource(LevelProgress::new(floor_level));
    world.insert_resource(PendingLevelStart { floor_level });

    crate::logger::log_info(&format!(
        "🗺️ Level requested: floor {} (best {}, currency {}), {} stale entities removed",
        floor_level,
        session.best_floor,
        session.currency,
        stale.len()
    ));
}

/// Завершить уровень: новое состояние сессии + итог
pub fn finish_level(world: &mut World) -> (SessionState, LevelOutcome) {
    let session = world
        .get_resource::<ActiveSession>()
        .map(|active| active.0)
        .unwrap_or_default();
    let progress = world.get_resource::<LevelProgress>().cloned().unwrap_or_default();

    let outcome = progress.outcome();
    let next = session.apply(outcome, progress.currency_collected);

    crate::logger::log_info(&format!(
        "📋 Level finished: {:?}, next floor {}, best {}, currency {}",
        outcome, next.floor_level, next.best_floor, next.currency
    ));

    (next, outcome)
}

/// Session Plugin
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelProgress>()
            .init_resource::<ActiveSession>()
            .add_event::<CurrencyCollected>()
            .add_event::<FloorCleared>();

        app.add_systems(
            Update,
            (collect_currency, detect_level_exit)
                .chain()
                .in_set(SimulationSet::Bookkeeping),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleared_floor_advances_and_raises_best() {
        let session = SessionState {
            floor_level: 4,
            best_floor: 4,
            currency: 20,
        };

        let next = session.apply(LevelOutcome::Cleared { floor: 4 }, 30);

        assert_eq!(next.floor_level, 5);
        assert_eq!(next.best_floor, 5);
        assert_eq!(next.currency, 50);
    }

    #[test]
    fn test_death_resets_floor_keeps_best() {
        let session = SessionState {
            floor_level: 6,
            best_floor: 9,
            currency: 0,
        };

        let next = session.apply(LevelOutcome::PlayerDied { floor: 6 }, 10);

        assert_eq!(next.floor_level, 1);
        assert_eq!(next.best_floor, 9);
        assert_eq!(next.currency, 10);
    }

    #[test]
    fn test_abandoned_level_changes_nothing() {
        let session = SessionState::default();
        assert_eq!(session.apply(LevelOutcome::Abandoned { floor: 1 }, 100), session);
    }

    #[test]
    fn test_progress_outcome_priority() {
        let mut progress = LevelProgress::new(3);
        assert_eq!(progress.outcome(), LevelOutcome::Abandoned { floor: 3 });

        progress.cleared = true;
        assert_eq!(progress.outcome(), LevelOutcome::Cleared { floor: 3 });

        progress.player_dead = true;
        assert_eq!(progress.outcome(), LevelOutcome::PlayerDied { floor: 3 });
    }
}
