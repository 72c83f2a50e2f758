//! Combat module: WeaponController, Projectile, CombatResolver
//!
//! ECS ответственность:
//! - Weapon state: ammo, fire delay, reload, aim, owner (оружие = entity)
//! - Projectile lifecycle: spawn → первое попадание ИЛИ lifespan
//! - Resolver: коллизии, взрывы + цепная реакция, урон, смерть, лут, выход
//!
//! Хост (рендер) получает события: AmmoChanged, HealthChanged, ActorDied,
//! CurrencyAwarded, LevelExitAvailable, WeaponFired, ExplosionOccurred.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod attacker;
pub mod damage;
pub mod explosion;
pub mod projectile;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use attacker::Attacker;
pub use damage::{
    ActorDied, CurrencyAwarded, DamageDealt, DamageIntent, DamageSource, HealthChanged, LevelExitAvailable,
};
pub use explosion::{explosion_damage, DetonationRequested, ExplosionOccurred};
pub use projectile::{Projectile, ProjectileDestroyed, ProjectileFate};
pub use weapon::{
    AmmoChanged, ReloadRequested, Weapon, WeaponControl, WeaponDropped, WeaponFireIntent, WeaponFired,
    WeaponPickedUp, WeaponPickupRequested,
};

/// Combat Plugin
///
/// Порядок выполнения внутри тика:
/// 1. Deferred: reload complete, lifespan, chain detonation, hit flash
/// 2. Weapons: pickup/drop → оружие за владельцем + прицел → reload → выстрелы
/// 3. Collision: снаряды против акторов, ящиков и стен
/// 4. Resolution: детонации → урон → переход в Dead → последствия смерти
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<WeaponFireIntent>()
            .add_event::<WeaponFired>()
            .add_event::<ReloadRequested>()
            .add_event::<WeaponPickupRequested>()
            .add_event::<WeaponPickedUp>()
            .add_event::<WeaponDropped>()
            .add_event::<AmmoChanged>()
            .add_event::<ProjectileDestroyed>()
            .add_event::<DetonationRequested>()
            .add_event::<ExplosionOccurred>()
            .add_event::<DamageIntent>()
            .add_event::<DamageDealt>()
            .add_event::<HealthChanged>()
            .add_event::<ActorDied>()
            .add_event::<CurrencyAwarded>()
            .add_event::<LevelExitAvailable>();

        app.add_systems(Update, systems::run_deferred_actions.in_set(SimulationSet::Deferred))
            .add_systems(
                Update,
                (
                    systems::process_pickup_requests,
                    systems::sync_weapons_to_owners,
                    systems::process_reload_requests,
                    systems::fire_weapons,
                )
                    .chain()
                    .in_set(SimulationSet::Weapons),
            )
            .add_systems(
                Update,
                systems::resolve_projectile_collisions.in_set(SimulationSet::Collision),
            )
            .add_systems(
                Update,
                (
                    systems::process_detonations,
                    systems::apply_damage,
                    crate::ai::systems::enter_dead_state,
                    systems::handle_actor_deaths,
                )
                    .chain()
                    .in_set(SimulationSet::Resolution),
            );
    }
}
