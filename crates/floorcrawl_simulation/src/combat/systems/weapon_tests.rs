//! Tests for weapon systems (auto-fire, reload, pickup/drop).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::combat::{Weapon, WeaponDropped, WeaponFired, WeaponPickedUp};
    use crate::components::{EquippedWeapon, Faction, Position};
    use crate::spawn::bundles::owned_weapon_bundle;
    use crate::timeline::DeferredQueue;
    use crate::Harness;

    const PLAYER_AT: Vec2 = Vec2::new(480.0, 256.0);

    fn weapon(harness: &Harness, entity: Entity) -> &Weapon {
        harness.world().get::<Weapon>(entity).unwrap()
    }

    /// Брошенное оружие на арене
    fn spawn_dropped_weapon(harness: &mut Harness, position: Vec2, ammo: u32) -> Entity {
        let config = harness.config();
        let world = harness.world_mut();
        let entity = world
            .spawn(owned_weapon_bundle(&config, Entity::PLACEHOLDER, Faction::Hostile, position))
            .id();
        let mut weapon = world.get_mut::<Weapon>(entity).unwrap();
        weapon.detach();
        weapon.ammo = ammo;
        entity
    }

    #[test]
    fn test_held_trigger_fires_full_magazine_then_auto_reloads() {
        let mut harness = Harness::new(1);
        let (_, gun) = harness.spawn_armed_player(PLAYER_AT);
        {
            let mut input = harness.input_mut();
            input.trigger_held = true;
            input.aim_target = Vec2::new(900.0, 256.0);
        }

        let mut shots = 0;
        for now in (0..3000).step_by(50) {
            harness.tick(now);
            shots += harness.drain_events::<WeaponFired>().len();
        }

        assert_eq!(shots, 30, "fire delay 100 мс → 30 выстрелов за 3 секунды");
        assert_eq!(weapon(&harness, gun).ammo, 0);
        assert!(weapon(&harness, gun).reloading, "пустой магазин под курком → auto-reload");

        // Перезарядка началась на 2950, закончится на 3950
        harness.input_mut().trigger_held = false;
        harness.tick(3900);
        assert_eq!(weapon(&harness, gun).ammo, 0);
        harness.tick(3950);
        assert_eq!(weapon(&harness, gun).ammo, 30);
        assert!(!weapon(&harness, gun).reloading);
    }

    #[test]
    fn test_reload_while_reloading_is_noop() {
        let mut harness = Harness::new(1);
        let (_, gun) = harness.spawn_armed_player(PLAYER_AT);
        harness.world_mut().get_mut::<Weapon>(gun).unwrap().ammo = 5;

        harness.input_mut().reload_requested = true;
        harness.tick(0);
        assert!(weapon(&harness, gun).reloading);

        harness.input_mut().reload_requested = true;
        harness.tick(500);

        harness.tick(999);
        assert_eq!(weapon(&harness, gun).ammo, 5);

        harness.tick(1000);
        assert_eq!(weapon(&harness, gun).ammo, 30);
        assert!(
            harness.world().resource::<DeferredQueue>().is_empty(),
            "второе завершение перезарядки не планируется"
        );
    }

    #[test]
    fn test_cannot_fire_while_reloading() {
        let mut harness = Harness::new(1);
        let (_, gun) = harness.spawn_armed_player(PLAYER_AT);
        harness.input_mut().reload_requested = true;
        harness.tick(0);

        harness.input_mut().trigger_held = true;
        harness.tick(100);
        harness.tick(200);

        assert!(harness.drain_events::<WeaponFired>().is_empty());
        assert_eq!(weapon(&harness, gun).ammo, 30);
    }

    #[test]
    fn test_projectile_spawns_at_muzzle_along_aim() {
        let mut harness = Harness::new(1);
        harness.spawn_armed_player(PLAYER_AT);
        {
            let mut input = harness.input_mut();
            input.trigger_held = true;
            input.aim_target = PLAYER_AT + Vec2::new(0.0, 100.0);
        }

        harness.tick(0);

        let fired = harness.drain_events::<WeaponFired>();
        assert_eq!(fired.len(), 1);
        let muzzle = harness.world().get::<Position>(fired[0].projectile).unwrap().0;
        assert!(muzzle.abs_diff_eq(PLAYER_AT + Vec2::new(0.0, 22.0), 1e-3), "muzzle = {muzzle:?}");
    }

    #[test]
    fn test_pickup_swaps_with_nearest_weapon() {
        let mut harness = Harness::new(1);
        let (player, old_gun) = harness.spawn_armed_player(PLAYER_AT);
        let near = spawn_dropped_weapon(&mut harness, PLAYER_AT + Vec2::new(30.0, 0.0), 3);
        let far = spawn_dropped_weapon(&mut harness, PLAYER_AT + Vec2::new(45.0, 0.0), 3);

        harness.input_mut().pickup_requested = true;
        harness.tick(0);

        let equipped = harness.world().get::<EquippedWeapon>(player).unwrap();
        assert_eq!(equipped.weapon, Some(near));

        let picked = weapon(&harness, near);
        assert_eq!(picked.owner, Some(player));
        assert_eq!(picked.ammo, picked.max_ammo, "подобранное игроком оружие заряжено полностью");

        let dropped = weapon(&harness, old_gun);
        assert!(dropped.dropped);
        assert_eq!(dropped.owner, None);
        assert!(weapon(&harness, far).dropped);

        assert_eq!(harness.drain_events::<WeaponPickedUp>().len(), 1);
        assert_eq!(harness.drain_events::<WeaponDropped>().len(), 1);
    }

    #[test]
    fn test_pickup_out_of_range_only_drops() {
        let mut harness = Harness::new(1);
        let (player, gun) = harness.spawn_armed_player(PLAYER_AT);
        let distant = spawn_dropped_weapon(&mut harness, PLAYER_AT + Vec2::new(50.0, 0.0), 3);

        harness.input_mut().pickup_requested = true;
        harness.tick(0);

        assert_eq!(harness.world().get::<EquippedWeapon>(player).unwrap().weapon, None);
        assert!(weapon(&harness, gun).dropped);
        assert!(weapon(&harness, distant).dropped, "ровно на границе радиуса не подбирается");
        assert!(harness.drain_events::<WeaponPickedUp>().is_empty());
    }

    #[test]
    fn test_unarmed_player_does_not_attack() {
        let mut harness = Harness::new(1);
        let (player, _) = harness.spawn_armed_player(PLAYER_AT);
        harness.world_mut().get_mut::<EquippedWeapon>(player).unwrap().weapon = None;

        harness.input_mut().trigger_held = true;
        harness.tick(0);

        assert!(harness.drain_events::<WeaponFired>().is_empty());
    }
}
