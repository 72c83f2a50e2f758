//! Movement компоненты: позиция, скорость (arcade, без физики)

use bevy::prelude::*;

/// Позиция на арене (2D, пиксели)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Position(pub Vec2);

/// Скорость по осям (units/sec), интегрируется в `physics::movement`
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

impl Velocity {
    pub fn is_moving(&self) -> bool {
        self.0.length_squared() > f32::EPSILON
    }
}

/// Скорость движения актора (units/sec)
#[derive(Component, Clone, Copy, Debug, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 100.0 }
    }
}
