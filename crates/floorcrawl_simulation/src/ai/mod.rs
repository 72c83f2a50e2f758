//! AI decision-making module: ActorStateMachine
//!
//! Одна FSM (Idle/Moving/Attacking/Dead) для всех акторов. Игрок получает
//! намерения из TickInput, враги из стратегии своего варианта
//! (MovementRule + AttackRule + stat block из конфига).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{
    ActorState, AttackRule, Hostile, HostileIntent, HostileVariant, Lunge, MovementRule, StateInputs, VariantProfile,
};

/// AI Plugin
///
/// Intent фаза: сначала игрок (его курок и скорость), потом враги.
/// Переход в Dead регистрирует CombatPlugin (после применения урона).
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::player_intent, systems::hostile_intent)
                .chain()
                .in_set(SimulationSet::Intent),
        );
    }
}
