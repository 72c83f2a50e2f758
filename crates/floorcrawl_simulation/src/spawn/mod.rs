//! SpawnDirector: сложность этажа + расстановка акторов и ящиков
//!
//! Работает один раз на старте уровня (`session::begin_level` ставит
//! `PendingLevelStart`, `spawn_level` его потребляет в `SimulationSet::Level`).

use bevy::prelude::*;

use crate::ai::HostileVariant;
use crate::SimulationSet;

pub mod bundles;
pub mod difficulty;
pub mod placement;
pub mod systems;

pub use difficulty::{calculate_difficulty, SpawnParams};
pub use placement::{place_or_fallback, sample_position, PlacementError};
pub use systems::{spawn_exit, spawn_level};

/// Что появилось (для рендера / физических тел хоста)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    Player,
    Hostile(HostileVariant),
    Weapon,
    Prop,
    LevelExit,
    Currency,
}

/// Event: создана entity, которой нужно представление у хоста
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequested {
    pub entity: Entity,
    pub kind: SpawnKind,
    pub position: Vec2,
}

/// Spawn Plugin
pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SpawnRequested>();

        app.add_systems(Update, spawn_level.in_set(SimulationSet::Level));
    }
}
