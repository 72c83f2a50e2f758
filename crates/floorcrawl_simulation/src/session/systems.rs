//! Bookkeeping systems: валюта и выход с уровня.

use bevy::prelude::*;

use crate::ai::ActorState;
use crate::components::{CurrencyPickup, LevelExit, Player, Position};
use crate::config::SimulationConfig;
use crate::session::{CurrencyCollected, FloorCleared, LevelProgress};

/// System: игрок собирает валюту касанием
pub fn collect_currency(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut progress: ResMut<LevelProgress>,
    players: Query<(&Position, &ActorState), With<Player>>,
    pickups: Query<(Entity, &CurrencyPickup, &Position), Without<Player>>,
    mut collected_events: EventWriter<CurrencyCollected>,
) {
    let Ok((player_position, state)) = players.single() else {
        return;
    };
    if state.is_dead() {
        return;
    }

    for (entity, pickup, position) in pickups.iter() {
        if position.0.distance(player_position.0) > config.loot.pickup_radius {
            continue;
        }

        progress.currency_collected = progress.currency_collected.saturating_add(pickup.value);
        collected_events.write(CurrencyCollected {
            pickup: entity,
            value: pickup.value,
            level_total: progress.currency_collected,
        });
        commands.entity(entity).despawn();

        crate::logger::log(&format!(
            "💰 Currency +{} (level total {})",
            pickup.value, progress.currency_collected
        ));
    }
}

/// System: игрок на выходе → этаж пройден (событие ровно один раз)
pub fn detect_level_exit(
    config: Res<SimulationConfig>,
    mut progress: ResMut<LevelProgress>,
    players: Query<(&Position, &ActorState), With<Player>>,
    exits: Query<&Position, (With<LevelExit>, Without<Player>)>,
    mut cleared_events: EventWriter<FloorCleared>,
) {
    if progress.cleared || progress.player_dead {
        return;
    }
    let Ok((player_position, state)) = players.single() else {
        return;
    };
    if state.is_dead() {
        return;
    }

    let reached = exits
        .iter()
        .any(|exit| exit.0.distance(player_position.0) <= config.level.exit_radius);
    if !reached {
        return;
    }

    progress.cleared = true;
    cleared_events.write(FloorCleared {
        floor: progress.floor_level,
    });
    crate::logger::log_info(&format!("🎉 Floor {} cleared", progress.floor_level));
}
