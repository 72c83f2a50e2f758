//! Combat systems (weapons, projectiles, explosions, damage, deferred actions)

pub mod damage;
pub mod deferred;
pub mod equipment;
pub mod explosion;
pub mod projectile;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export all systems
pub use damage::*;
pub use deferred::*;
pub use equipment::*;
pub use explosion::*;
pub use projectile::*;
pub use weapon::*;
