//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: Actor, Faction, Health, EquippedWeapon, HitFlash
//! - movement: Position, Velocity, MovementSpeed
//! - world: ArenaBounds, Prop, LevelExit, CurrencyPickup, LevelEntity
//! - player: Player marker

pub mod actor;
pub mod movement;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use player::*;
pub use world::*;
