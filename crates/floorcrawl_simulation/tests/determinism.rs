//! Тесты детерминизма
//!
//! Один seed + один и тот же TickInput скрипт → идентичный мир.

use floorcrawl_simulation::*;

use bevy::prelude::*;

/// Этаж `floor` с seed, плюс скриптованный бой до `until_ms`
fn run_floor(seed: u64, floor: u32, until_ms: u64) -> Harness {
    let mut harness = Harness::new(seed);
    harness.begin_level(SessionState {
        floor_level: floor,
        best_floor: floor,
        currency: 0,
    });
    harness.tick(0);

    // Игрок стреляет вправо-вверх и стрейфит
    {
        let mut input = harness.input_mut();
        input.trigger_held = true;
        input.aim_target = Vec2::new(900.0, 100.0);
        input.movement = Vec2::new(0.0, 1.0);
    }
    harness.run_until(until_ms, 50);
    harness
}

fn positions(harness: &mut Harness) -> Vec<u8> {
    world_snapshot::<Position>(harness.world_mut())
}

fn healths(harness: &mut Harness) -> Vec<u8> {
    world_snapshot::<Health>(harness.world_mut())
}

#[test]
fn test_same_seed_same_layout() {
    const SEED: u64 = 12345;

    let mut first = run_floor(SEED, 7, 0);
    let mut second = run_floor(SEED, 7, 0);

    assert_eq!(
        positions(&mut first),
        positions(&mut second),
        "Раскладка с одинаковым seed ({}) отличается!",
        SEED
    );
}

#[test]
fn test_different_seed_different_layout() {
    let mut first = run_floor(1, 7, 0);
    let mut second = run_floor(2, 7, 0);

    assert_ne!(positions(&mut first), positions(&mut second));
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // 5 прогонов по 8 секунд боя: все должны совпасть с первым
    let snapshots: Vec<_> = (0..5)
        .map(|_| {
            let mut harness = run_floor(SEED, 6, 8000);
            (positions(&mut harness), healths(&mut harness))
        })
        .collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_difficulty_scaling_is_monotonic() {
    let config = SimulationConfig::default();
    let mut previous = calculate_difficulty(1, &config.difficulty);

    for floor in 2..=200 {
        let params = calculate_difficulty(floor, &config.difficulty);
        assert!(params.enemy_count >= previous.enemy_count);
        assert!(params.prop_count >= previous.prop_count);
        assert!(params.enemy_count <= config.difficulty.enemy_cap);
        assert!(params.prop_count <= config.difficulty.prop_cap);
        previous = params;
    }
}
