//! Tests for hostile strategies (через полный headless App).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ai::{ActorState, HostileVariant, Lunge};
    use crate::combat::{Attacker, DamageDealt, Projectile, WeaponFired};
    use crate::components::{Faction, Health, Velocity};
    use crate::Harness;

    const PLAYER_AT: Vec2 = Vec2::new(480.0, 256.0);

    fn ranged_at_distance(distance: f32) -> (Harness, Entity) {
        let mut harness = Harness::new(7);
        harness.spawn_armed_player(PLAYER_AT);
        let hostile = harness.spawn_hostile(HostileVariant::Ranged, PLAYER_AT - Vec2::new(distance, 0.0), 0);
        (harness, hostile)
    }

    #[test]
    fn test_ranged_retreats_when_too_close() {
        let (mut harness, hostile) = ranged_at_distance(100.0);
        harness.tick(0);

        let velocity = harness.world().get::<Velocity>(hostile).unwrap();
        assert!(velocity.0.x < 0.0, "должен отходить от игрока, velocity = {:?}", velocity.0);
        assert_eq!(*harness.world().get::<ActorState>(hostile).unwrap(), ActorState::Attacking);
    }

    #[test]
    fn test_ranged_holds_inside_band() {
        let (mut harness, hostile) = ranged_at_distance(250.0);
        harness.tick(0);

        assert_eq!(harness.world().get::<Velocity>(hostile).unwrap().0, Vec2::ZERO);
        assert_eq!(*harness.world().get::<ActorState>(hostile).unwrap(), ActorState::Attacking);
    }

    #[test]
    fn test_ranged_approaches_when_far() {
        let (mut harness, hostile) = ranged_at_distance(400.0);
        harness.tick(0);

        let velocity = harness.world().get::<Velocity>(hostile).unwrap();
        assert!(velocity.0.x > 0.0, "должен приближаться, velocity = {:?}", velocity.0);
        assert_eq!(*harness.world().get::<ActorState>(hostile).unwrap(), ActorState::Moving);
    }

    #[test]
    fn test_ranged_first_shot_is_delayed() {
        let (mut harness, _hostile) = ranged_at_distance(250.0);

        // События живут два кадра, поэтому забираем их каждый тик
        for now in (0..=4000).step_by(50) {
            harness.tick(now);
            assert!(
                harness.drain_events::<WeaponFired>().is_empty(),
                "стрелок не стреляет раньше задержки + cooldown (t = {now})"
            );
        }

        harness.tick(4050);
        assert_eq!(harness.drain_events::<WeaponFired>().len(), 1);
    }

    #[test]
    fn test_ranged_fires_hostile_projectile_with_own_damage() {
        let (mut harness, hostile) = ranged_at_distance(250.0);
        harness.world_mut().get_mut::<Attacker>(hostile).unwrap().last_attack_ms = None;

        harness.tick(0);

        let fired = harness.drain_events::<WeaponFired>();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].shooter, Some(hostile));

        let projectile = harness.world().get::<Projectile>(fired[0].projectile).unwrap();
        assert_eq!(projectile.faction(), Faction::Hostile);
        assert_eq!(projectile.damage, 15);
    }

    #[test]
    fn test_brute_strike_respects_strict_cooldown() {
        let mut harness = Harness::new(7);
        let (player, _) = harness.spawn_armed_player(PLAYER_AT);
        harness.spawn_hostile(HostileVariant::Brute, PLAYER_AT + Vec2::new(30.0, 0.0), 0);

        harness.tick(0);
        assert_eq!(harness.world().get::<Health>(player).unwrap().current, 90);
        assert_eq!(harness.drain_events::<DamageDealt>().len(), 1);

        harness.tick(500);
        harness.tick(1000);
        assert_eq!(
            harness.world().get::<Health>(player).unwrap().current,
            90,
            "ровно cooldown ещё не достаточно"
        );

        harness.tick(1001);
        assert_eq!(harness.world().get::<Health>(player).unwrap().current, 80);

        assert_eq!(harness.drain_events::<DamageDealt>().len(), 1);
    }

    #[test]
    fn test_melee_lunge_hits_and_returns_to_origin() {
        let mut harness = Harness::new(7);
        let (player, _) = harness.spawn_armed_player(PLAYER_AT);
        let origin = PLAYER_AT + Vec2::new(40.0, 0.0);
        let melee = harness.spawn_hostile(HostileVariant::Melee, origin, 0);

        harness.tick(0);
        assert_eq!(harness.world().get::<Health>(player).unwrap().current, 75);
        assert!(harness.world().get::<Lunge>(melee).is_some());

        harness.tick(100);
        let mid = harness.position(melee).unwrap();
        assert!(mid.x < origin.x, "в середине выпада враг ближе к игроку");

        harness.tick(250);
        assert!(harness.world().get::<Lunge>(melee).is_none());
        assert_eq!(harness.position(melee).unwrap(), origin);
    }

    #[test]
    fn test_hostiles_idle_without_player() {
        let mut harness = Harness::new(7);
        let brute = harness.spawn_hostile(HostileVariant::Brute, Vec2::new(300.0, 300.0), 0);

        harness.tick(0);
        harness.tick(100);

        assert_eq!(*harness.world().get::<ActorState>(brute).unwrap(), ActorState::Idle);
        assert_eq!(harness.position(brute).unwrap(), Vec2::new(300.0, 300.0));
    }
}
