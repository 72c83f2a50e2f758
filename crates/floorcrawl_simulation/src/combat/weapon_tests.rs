//! Tests for Weapon component (fire/reload/pickup rules).

#[cfg(test)]
mod tests {
    use super::super::weapon::{Weapon, WeaponControl};
    use crate::components::Faction;
    use bevy::prelude::*;

    #[test]
    fn test_fire_decrements_ammo_once() {
        let mut weapon = Weapon::default();

        assert!(weapon.try_fire(0));
        assert_eq!(weapon.ammo, 29);
        assert_eq!(weapon.last_fired_ms, Some(0));
    }

    #[test]
    fn test_fire_respects_delay() {
        let mut weapon = Weapon::default();
        assert!(weapon.try_fire(1000));

        assert!(!weapon.try_fire(1050));
        assert_eq!(weapon.ammo, 29);

        // now - last ≥ delay
        assert!(weapon.try_fire(1100));
        assert_eq!(weapon.ammo, 28);
    }

    #[test]
    fn test_fire_every_50ms_for_3s_gives_30_shots() {
        let mut weapon = Weapon::default();
        let mut shots = 0;

        for now in (0..3000).step_by(50) {
            if weapon.try_fire(now) {
                shots += 1;
            }
        }

        assert_eq!(shots, 30);
        assert_eq!(weapon.ammo, 0);
        // 31-я попытка: no-op до перезарядки
        assert!(!weapon.try_fire(3000));
        assert_eq!(weapon.ammo, 0);
    }

    #[test]
    fn test_no_fire_while_reloading() {
        let mut weapon = Weapon::default();
        assert!(weapon.begin_reload());

        assert!(!weapon.try_fire(0));
        assert_eq!(weapon.ammo, 30);
    }

    #[test]
    fn test_repeated_reload_is_noop() {
        let mut weapon = Weapon {
            ammo: 0,
            ..Default::default()
        };

        assert!(weapon.needs_reload());
        assert!(weapon.begin_reload());
        assert!(!weapon.begin_reload());
        assert!(!weapon.needs_reload());
        assert_eq!(weapon.ammo, 0);

        assert!(weapon.finish_reload());
        assert_eq!(weapon.ammo, 30);
        assert!(!weapon.reloading);

        // Повторное завершение без перезарядки ничего не меняет
        weapon.ammo = 5;
        assert!(!weapon.finish_reload());
        assert_eq!(weapon.ammo, 5);
    }

    #[test]
    fn test_aim_and_muzzle_position() {
        let mut weapon = Weapon::default();
        weapon.aim_at(Vec2::new(100.0, 100.0), Vec2::new(100.0, 200.0));

        let muzzle = weapon.muzzle_position(Vec2::new(100.0, 100.0));
        assert!(muzzle.abs_diff_eq(Vec2::new(100.0, 122.0), 1e-3), "muzzle = {:?}", muzzle);

        // Цель совпадает с позицией, угол не меняется
        let angle = weapon.aim_angle;
        weapon.aim_at(Vec2::ZERO, Vec2::ZERO);
        assert_eq!(weapon.aim_angle, angle);
    }

    #[test]
    fn test_player_pickup_resets_ammo() {
        let mut weapon = Weapon {
            ammo: 3,
            ..Default::default()
        };
        weapon.detach();
        assert!(weapon.dropped);

        weapon.attach_to(Entity::from_raw(1), Faction::Player);

        assert_eq!(weapon.ammo, 30);
        assert_eq!(weapon.control, WeaponControl::PlayerAimed);
        assert!(!weapon.dropped);
    }

    #[test]
    fn test_hostile_pickup_keeps_ammo() {
        let mut weapon = Weapon {
            ammo: 3,
            ..Default::default()
        };

        weapon.attach_to(Entity::from_raw(2), Faction::Hostile);

        assert_eq!(weapon.ammo, 3);
        assert_eq!(weapon.control, WeaponControl::AiAimed);
    }

    #[test]
    fn test_drop_switches_ai_control_off() {
        let owner = Entity::from_raw(5);
        let mut weapon = Weapon::default();
        weapon.attach_to(owner, Faction::Hostile);
        weapon.trigger_held = true;

        assert_eq!(weapon.detach(), Some(owner));
        assert_eq!(weapon.owner, None);
        assert_eq!(weapon.control, WeaponControl::PlayerAimed);
        assert!(!weapon.trigger_held);
    }
}
