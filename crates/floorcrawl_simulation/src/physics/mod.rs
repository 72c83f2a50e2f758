//! Movement module (arcade, без физического движка)

use bevy::prelude::*;

use crate::components::ArenaBounds;
use crate::config::SimulationConfig;
use crate::SimulationSet;

pub mod movement;

// Re-export основных систем
pub use movement::{animate_lunges, block_actors_by_props, integrate_actor_velocity, move_projectiles};

/// Movement Plugin
///
/// `ArenaBounds` берётся из конфига, если хост не вставил свой прямоугольник.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ArenaBounds>() {
            let bounds = app
                .world()
                .get_resource::<SimulationConfig>()
                .map(|config| config.arena.bounds())
                .unwrap_or_default();
            app.insert_resource(bounds);
        }

        app.add_systems(
            Update,
            (
                integrate_actor_velocity,
                animate_lunges,
                block_actors_by_props,
                move_projectiles,
            )
                .chain()
                .in_set(SimulationSet::Motion),
        );
    }
}
