//! Weapon systems (aim, reload, fire → projectiles).

use bevy::prelude::*;
use std::collections::HashSet;

use crate::combat::{
    AmmoChanged, Attacker, Projectile, ReloadRequested, Weapon, WeaponControl, WeaponFireIntent, WeaponFired,
};
use crate::components::{Actor, Health, Player, Position, Velocity};
use crate::config::SimulationConfig;
use crate::timeline::{DeferredAction, DeferredQueue, GameClock, TickInput};

/// Начать перезарядку и запланировать её завершение
///
/// false = уже перезаряжается (no-op, второе завершение не планируется).
pub fn start_reload(entity: Entity, weapon: &mut Weapon, now_ms: u64, queue: &mut DeferredQueue) -> bool {
    if !weapon.begin_reload() {
        crate::logger::log(&format!("🔄 Weapon {:?} already reloading", entity));
        return false;
    }

    let completes_at = now_ms.saturating_add(weapon.reload_ms);
    queue.schedule(completes_at, DeferredAction::ReloadComplete { weapon: entity });

    crate::logger::log(&format!(
        "🔄 Weapon {:?} reload started ({} ms, ready at {})",
        entity, weapon.reload_ms, completes_at
    ));
    true
}

/// System: оружие следует за владельцем и поворачивается к цели
///
/// PlayerAimed → точка курсора, AiAimed → позиция игрока.
pub fn sync_weapons_to_owners(
    input: Res<TickInput>,
    mut weapons: Query<(&mut Weapon, &mut Position)>,
    owners: Query<&Position, (With<Actor>, Without<Weapon>)>,
    players: Query<&Position, (With<Player>, Without<Weapon>)>,
) {
    let player_position = players.iter().next().map(|position| position.0);

    for (mut weapon, mut position) in weapons.iter_mut() {
        let Some(owner) = weapon.owner else {
            continue;
        };
        let Ok(owner_position) = owners.get(owner) else {
            continue;
        };

        position.0 = owner_position.0;

        let target = match weapon.control {
            WeaponControl::PlayerAimed => Some(input.aim_target),
            WeaponControl::AiAimed => player_position,
        };
        if let Some(target) = target {
            weapon.aim_at(position.0, target);
        }
    }
}

/// System: обработка ReloadRequested (кнопка R, auto-reload игрока)
pub fn process_reload_requests(
    mut requests: EventReader<ReloadRequested>,
    clock: Res<GameClock>,
    mut queue: ResMut<DeferredQueue>,
    mut weapons: Query<&mut Weapon>,
    mut ammo_events: EventWriter<AmmoChanged>,
) {
    for request in requests.read() {
        let Ok(mut weapon) = weapons.get_mut(request.weapon) else {
            continue;
        };

        if start_reload(request.weapon, &mut weapon, clock.now_ms(), &mut queue) {
            ammo_events.write(AmmoChanged::from_weapon(request.weapon, &weapon));
        }
    }
}

/// System: выстрелы
///
/// Стреляет оружие с зажатым курком (auto-fire: попытка КАЖДЫЙ тик, не по
/// фронту) и оружие с AI fire intent этого тика. Урон пули: `Attacker` владельца
/// (враги), иначе урон самого оружия (игрок).
pub fn fire_weapons(
    mut commands: Commands,
    clock: Res<GameClock>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<DeferredQueue>,
    mut intents: EventReader<WeaponFireIntent>,
    mut weapons: Query<(Entity, &mut Weapon, &Position)>,
    owners: Query<(&Actor, &Health, Option<&Attacker>)>,
    mut fired_events: EventWriter<WeaponFired>,
    mut ammo_events: EventWriter<AmmoChanged>,
) {
    let now = clock.now_ms();
    let ai_requested: HashSet<Entity> = intents.read().map(|intent| intent.weapon).collect();

    for (entity, mut weapon, position) in weapons.iter_mut() {
        let Some(owner) = weapon.owner else {
            continue;
        };
        if !weapon.trigger_held && !ai_requested.contains(&entity) {
            continue;
        }
        let Ok((actor, health, attacker)) = owners.get(owner) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        if !weapon.try_fire(now) {
            continue;
        }

        let damage = attacker.map_or(weapon.damage, |attacker| attacker.base_damage);
        let muzzle = weapon.muzzle_position(position.0);
        let velocity = weapon.direction() * config.projectile.speed;

        let projectile = commands.spawn_empty().id();
        let lifespan = config.projectile.lifespan_ms;
        let expiry = queue.schedule(now.saturating_add(lifespan), DeferredAction::ProjectileExpired { projectile });

        let mut state = Projectile::new(actor.faction, damage, entity, now, lifespan);
        state.shooter = Some(owner);
        state.radius = config.projectile.radius;
        state.expiry = Some(expiry);
        commands
            .entity(projectile)
            .insert((state, Position(muzzle), Velocity(velocity)));

        crate::logger::log(&format!(
            "🔫 Weapon {:?} fired {:?} (ammo {}/{}, dmg {})",
            entity, projectile, weapon.ammo, weapon.max_ammo, damage
        ));

        fired_events.write(WeaponFired {
            weapon: entity,
            shooter: Some(owner),
            projectile,
            muzzle,
            angle: weapon.aim_angle,
        });
        ammo_events.write(AmmoChanged::from_weapon(entity, &weapon));

        // Стрелок сам перезаряжается, когда магазин пуст
        if weapon.control == WeaponControl::AiAimed && weapon.needs_reload() {
            start_reload(entity, &mut weapon, now, &mut queue);
        }
    }
}
