//! Timeline: монотонные часы, pause gate и очередь отложенных действий
//!
//! Время ведёт хост (`TickInput::now_ms`), Bevy `Time` не используется:
//! так reload/lifespan/chain-delay считаются в тех же миллисекундах, что и ввод.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod clock;
pub mod deferred;
pub mod freeze;

pub use clock::{sync_clock, GameClock, TickInput};
pub use deferred::{DeferredAction, DeferredHandle, DeferredQueue};
pub use freeze::{release_timed_freeze, SimulationFreeze};

/// Timeline Plugin
///
/// Сами отложенные действия исполняет `combat::systems::run_deferred_actions`
/// (им нужны combat-компоненты для liveness проверок).
pub struct TimelinePlugin;

impl Plugin for TimelinePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TickInput>()
            .init_resource::<GameClock>()
            .init_resource::<SimulationFreeze>()
            .init_resource::<DeferredQueue>();

        app.add_systems(
            Update,
            (sync_clock, release_timed_freeze)
                .chain()
                .in_set(SimulationSet::Clock),
        );
    }
}
