//! SpawnDirector systems: старт уровня и появление выхода.

use bevy::prelude::*;

use crate::ai::AttackRule;
use crate::combat::LevelExitAvailable;
use crate::components::{ArenaBounds, EquippedWeapon, Faction};
use crate::config::SimulationConfig;
use crate::session::{LevelProgress, PendingLevelStart};
use crate::spawn::bundles::{exit_bundle, hostile_bundle, owned_weapon_bundle, player_bundle, prop_bundle};
use crate::spawn::placement::place_or_fallback;
use crate::spawn::{calculate_difficulty, SpawnKind, SpawnRequested};
use crate::timeline::{GameClock, SimulationFreeze};
use crate::DeterministicRng;

/// System: старт уровня (один раз на `PendingLevelStart`)
///
/// Порядок: игрок в центре арены со стартовым оружием → враги → ящики →
/// заморозка-отсчёт. RNG детерминистичный, так что один seed = одна раскладка.
pub fn spawn_level(
    mut commands: Commands,
    pending: Option<Res<PendingLevelStart>>,
    config: Res<SimulationConfig>,
    arena: Res<ArenaBounds>,
    clock: Res<GameClock>,
    mut rng: ResMut<DeterministicRng>,
    mut freeze: ResMut<SimulationFreeze>,
    mut progress: ResMut<LevelProgress>,
    mut spawn_events: EventWriter<SpawnRequested>,
    mut exit_events: EventWriter<LevelExitAvailable>,
) {
    let Some(pending) = pending else {
        return;
    };
    let floor_level = pending.floor_level;
    commands.remove_resource::<PendingLevelStart>();

    let now = clock.now_ms();
    let area = arena.inset(config.arena.spawn_margin);
    let params = calculate_difficulty(floor_level, &config.difficulty);
    *progress = LevelProgress::new(floor_level);

    // Игрок + стартовое оружие
    let player_position = arena.center();
    let player = commands.spawn(player_bundle(&config, player_position)).id();
    let weapon = commands
        .spawn(owned_weapon_bundle(&config, player, Faction::Player, player_position))
        .id();
    commands.entity(player).insert(EquippedWeapon { weapon: Some(weapon) });
    progress.player = Some(player);

    spawn_events.write(SpawnRequested {
        entity: player,
        kind: SpawnKind::Player,
        position: player_position,
    });
    spawn_events.write(SpawnRequested {
        entity: weapon,
        kind: SpawnKind::Weapon,
        position: player_position,
    });

    // Враги
    for _ in 0..params.enemy_count {
        let variant = params.roll_variant(&mut rng.rng);
        let position = place_or_fallback(
            &mut rng.rng,
            area,
            player_position,
            config.placement.min_separation,
            config.placement.max_attempts,
            variant.name(),
        );

        let hostile = commands.spawn(hostile_bundle(&config, variant, position, now)).id();
        spawn_events.write(SpawnRequested {
            entity: hostile,
            kind: SpawnKind::Hostile(variant),
            position,
        });

        if config.variants.profile(variant).attack == AttackRule::Shoot {
            let gun = commands
                .spawn(owned_weapon_bundle(&config, hostile, Faction::Hostile, position))
                .id();
            commands.entity(hostile).insert(EquippedWeapon { weapon: Some(gun) });
            spawn_events.write(SpawnRequested {
                entity: gun,
                kind: SpawnKind::Weapon,
                position,
            });
        }
    }

    // Ящики
    for _ in 0..params.prop_count {
        let position = place_or_fallback(
            &mut rng.rng,
            area,
            player_position,
            config.placement.min_separation,
            config.placement.max_attempts,
            "prop",
        );
        let prop = commands.spawn(prop_bundle(&config, position)).id();
        spawn_events.write(SpawnRequested {
            entity: prop,
            kind: SpawnKind::Prop,
            position,
        });
    }

    if config.level.countdown_ms > 0 {
        freeze.freeze_until(now.saturating_add(config.level.countdown_ms));
    }

    crate::logger::log_info(&format!(
        "🏁 Floor {} started: {} hostiles, {} props (seed {})",
        floor_level, params.enemy_count, params.prop_count, rng.seed
    ));

    // Пустой этаж: выход доступен сразу
    if params.enemy_count == 0 {
        if let Some((exit, position)) = spawn_exit(
            &mut commands,
            &mut rng,
            &config,
            area,
            player_position,
            &mut progress,
            &mut spawn_events,
        ) {
            exit_events.write(LevelExitAvailable { exit, position });
        }
    }
}

/// Поставить выход с уровня (не ближе `exit_min_separation` к игроку)
///
/// Возвращает None если выход уже есть: выход появляется ровно один раз.
pub fn spawn_exit(
    commands: &mut Commands,
    rng: &mut DeterministicRng,
    config: &SimulationConfig,
    area: ArenaBounds,
    player_position: Vec2,
    progress: &mut LevelProgress,
    spawn_events: &mut EventWriter<SpawnRequested>,
) -> Option<(Entity, Vec2)> {
    if progress.exit.is_some() {
        return None;
    }

    let position = place_or_fallback(
        &mut rng.rng,
        area,
        player_position,
        config.placement.exit_min_separation,
        config.placement.max_attempts,
        "level exit",
    );
    let exit = commands.spawn(exit_bundle(position)).id();
    progress.exit = Some(exit);

    spawn_events.write(SpawnRequested {
        entity: exit,
        kind: SpawnKind::LevelExit,
        position,
    });
    crate::logger::log_info(&format!("🪜 Level exit spawned at {:?}", position));

    Some((exit, position))
}
