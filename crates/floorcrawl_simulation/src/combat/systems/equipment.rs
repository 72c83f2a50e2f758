//! Equipment systems (pickup / drop).

use bevy::prelude::*;

use crate::combat::{AmmoChanged, Weapon, WeaponDropped, WeaponPickedUp, WeaponPickupRequested};
use crate::components::{Actor, EquippedWeapon, Position};
use crate::config::SimulationConfig;

/// System: обработка WeaponPickupRequested
///
/// Ближайшее брошенное оружие строже `weapon_pickup_range` → подобрать
/// (своё оружие при этом бросается: не больше одного на актора).
/// Если рядом ничего нет, а в руках оружие, бросить его.
pub fn process_pickup_requests(
    mut requests: EventReader<WeaponPickupRequested>,
    config: Res<SimulationConfig>,
    mut actors: Query<(&Actor, &Position, &mut EquippedWeapon), Without<Weapon>>,
    mut weapons: Query<(Entity, &mut Weapon, &mut Position), Without<Actor>>,
    mut picked_events: EventWriter<WeaponPickedUp>,
    mut dropped_events: EventWriter<WeaponDropped>,
    mut ammo_events: EventWriter<AmmoChanged>,
) {
    let range = config.level.weapon_pickup_range;

    for request in requests.read() {
        let Ok((actor, actor_position, mut equipped)) = actors.get_mut(request.actor) else {
            continue;
        };
        let origin = actor_position.0;

        let nearest = weapons
            .iter()
            .filter(|(_, weapon, _)| weapon.dropped && weapon.owner.is_none())
            .map(|(entity, _, position)| (entity, position.0.distance(origin)))
            .filter(|(_, distance)| *distance < range)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        // Старое оружие бросаем в любом случае: и при подборе, и без него
        if let Some(current) = equipped.weapon.take() {
            if let Ok((_, mut weapon, mut position)) = weapons.get_mut(current) {
                weapon.detach();
                position.0 = origin;
                dropped_events.write(WeaponDropped {
                    weapon: current,
                    position: origin,
                });
                crate::logger::log_info(&format!("📤 Actor {:?} dropped weapon {:?} at {:?}", request.actor, current, origin));
            }
        }

        let Some(target) = nearest else {
            continue;
        };
        let Ok((_, mut weapon, mut position)) = weapons.get_mut(target) else {
            continue;
        };

        weapon.attach_to(request.actor, actor.faction);
        position.0 = origin;
        equipped.weapon = Some(target);

        picked_events.write(WeaponPickedUp {
            weapon: target,
            owner: request.actor,
        });
        ammo_events.write(AmmoChanged::from_weapon(target, &weapon));
        crate::logger::log_info(&format!(
            "📥 Actor {:?} picked up weapon {:?} (ammo {}/{})",
            request.actor, target, weapon.ammo, weapon.max_ammo
        ));
    }
}
