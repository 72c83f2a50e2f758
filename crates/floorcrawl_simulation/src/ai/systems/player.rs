//! Player intent: TickInput → FSM, скорость, курок, reload/pickup.

use bevy::prelude::*;

use crate::ai::{ActorState, StateInputs};
use crate::combat::{ReloadRequested, Weapon, WeaponPickupRequested};
use crate::components::{EquippedWeapon, Health, MovementSpeed, Player, Velocity};
use crate::timeline::TickInput;

/// System: намерения игрока
///
/// Attacking не блокирует движение (стрейф во время стрельбы). Пустой магазин
/// в Attacking → один ReloadRequested (дальше перезарядка уже идёт).
/// `reload_requested` / `pickup_requested` сбрасываются после обработки.
pub fn player_intent(
    mut input: ResMut<TickInput>,
    mut players: Query<
        (Entity, &Health, &MovementSpeed, &EquippedWeapon, &mut ActorState, &mut Velocity),
        With<Player>,
    >,
    mut weapons: Query<&mut Weapon>,
    mut reload_events: EventWriter<ReloadRequested>,
    mut pickup_events: EventWriter<WeaponPickupRequested>,
) {
    let reload_requested = std::mem::take(&mut input.reload_requested);
    let pickup_requested = std::mem::take(&mut input.pickup_requested);

    let Ok((entity, health, speed, equipped, mut state, mut velocity)) = players.single_mut() else {
        return;
    };
    if state.is_dead() || !health.is_alive() {
        velocity.0 = Vec2::ZERO;
        return;
    }

    let movement = input.movement.normalize_or_zero() * speed.speed;
    let inputs = StateInputs {
        health_depleted: false,
        moving: movement != Vec2::ZERO,
        attack_triggered: input.trigger_held && equipped.weapon.is_some(),
    };
    if let Some(previous) = state.advance(&inputs) {
        crate::logger::log(&format!("🐧 Player {:?}: {:?} → {:?}", entity, previous, *state));
    }

    velocity.0 = movement;

    if let Some(weapon_entity) = equipped.weapon {
        if let Ok(mut weapon) = weapons.get_mut(weapon_entity) {
            let attacking = *state == ActorState::Attacking;
            weapon.trigger_held = attacking;

            if reload_requested || (attacking && weapon.needs_reload()) {
                reload_events.write(ReloadRequested { weapon: weapon_entity });
            }
        }
    }

    if pickup_requested {
        pickup_events.write(WeaponPickupRequested { actor: entity });
    }
}
