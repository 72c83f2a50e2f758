//! FSM systems: переход в Dead.

use bevy::prelude::*;

use crate::ai::{ActorState, Hostile, Lunge, StateInputs};
use crate::combat::ActorDied;
use crate::components::{Actor, Health, Position, Velocity};

/// System: health == 0 → Dead (из любого состояния)
///
/// ActorDied пишется только на самом переходе; Dead терминальное, так что
/// событие ровно одно на актора.
pub fn enter_dead_state(
    mut commands: Commands,
    mut actors: Query<(Entity, &Actor, &Health, &Position, &mut ActorState, &mut Velocity, Option<&Hostile>)>,
    mut died_events: EventWriter<ActorDied>,
) {
    let dying = StateInputs {
        health_depleted: true,
        ..Default::default()
    };

    for (entity, actor, health, position, mut state, mut velocity, hostile) in actors.iter_mut() {
        if health.is_alive() {
            continue;
        }
        let Some(previous) = state.advance(&dying) else {
            continue;
        };

        velocity.0 = Vec2::ZERO;
        commands.entity(entity).remove::<Lunge>();

        died_events.write(ActorDied {
            entity,
            faction: actor.faction,
            variant: hostile.map(|hostile| hostile.variant),
            position: position.0,
        });
        crate::logger::log(&format!("☠️ Actor {:?}: {:?} → Dead", entity, previous));
    }
}
