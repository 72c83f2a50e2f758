//! Damage systems: применение урона и последствия смерти.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{ActorState, Hostile};
use crate::combat::{ActorDied, CurrencyAwarded, DamageDealt, DamageIntent, HealthChanged, LevelExitAvailable};
use crate::components::{ArenaBounds, EquippedWeapon, Faction, Health, HitFlash, Player, Position};
use crate::config::SimulationConfig;
use crate::session::LevelProgress;
use crate::spawn::bundles::currency_bundle;
use crate::spawn::{spawn_exit, SpawnKind, SpawnRequested};
use crate::timeline::{DeferredAction, DeferredQueue, GameClock, SimulationFreeze};
use crate::DeterministicRng;

/// System: применение DamageIntent
///
/// Мёртвые (health == 0 или Dead) урон не получают. Каждое попадание
/// ставит HitFlash на `hit_flash_ms`.
pub fn apply_damage(
    mut commands: Commands,
    clock: Res<GameClock>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<DeferredQueue>,
    mut intents: EventReader<DamageIntent>,
    mut targets: Query<(&mut Health, &ActorState)>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut health_events: EventWriter<HealthChanged>,
) {
    let now = clock.now_ms();

    for intent in intents.read() {
        let Ok((mut health, state)) = targets.get_mut(intent.target) else {
            continue;
        };
        if state.is_dead() || !health.is_alive() {
            continue;
        }

        let applied = health.take_damage(intent.amount);

        dealt_events.write(DamageDealt {
            target: intent.target,
            instigator: intent.instigator,
            source: intent.source,
            damage: intent.amount,
            applied,
        });
        health_events.write(HealthChanged {
            entity: intent.target,
            current: health.current,
            max: health.max,
        });

        let until_ms = now.saturating_add(config.level.hit_flash_ms);
        commands.entity(intent.target).try_insert(HitFlash { until_ms });
        queue.schedule(until_ms, DeferredAction::HitFlashEnd { actor: intent.target });

        crate::logger::log(&format!(
            "💥 {:?} → {:?}: {} dmg via {:?} (HP {}/{})",
            intent.instigator, intent.target, applied, intent.source, health.current, health.max
        ));
    }
}

/// System: последствия смерти (по ActorDied)
///
/// Игрок → симуляция останавливается навсегда (до `begin_level`).
/// Враг → 1..=3 монеты, оружие уничтожается вместе с ним, entity удаляется;
/// если живых врагов не осталось, появляется выход (один раз).
pub fn handle_actor_deaths(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    arena: Res<ArenaBounds>,
    mut rng: ResMut<DeterministicRng>,
    mut freeze: ResMut<SimulationFreeze>,
    mut progress: ResMut<LevelProgress>,
    mut deaths: EventReader<ActorDied>,
    equipment: Query<&EquippedWeapon>,
    hostiles: Query<&ActorState, With<Hostile>>,
    players: Query<&Position, With<Player>>,
    mut currency_events: EventWriter<CurrencyAwarded>,
    mut exit_events: EventWriter<LevelExitAvailable>,
    mut spawn_events: EventWriter<SpawnRequested>,
) {
    let mut hostile_died = false;

    for death in deaths.read() {
        match death.faction {
            Faction::Player => {
                freeze.halt();
                progress.player_dead = true;
                crate::logger::log_info(&format!(
                    "☠️ Player {:?} died on floor {}, simulation halted",
                    death.entity, progress.floor_level
                ));
            }
            Faction::Hostile => {
                hostile_died = true;
                progress.hostiles_killed += 1;

                let (low, high) = (
                    config.loot.min_drops.min(config.loot.max_drops),
                    config.loot.min_drops.max(config.loot.max_drops),
                );
                let drops = rng.rng.gen_range(low..=high);
                for _ in 0..drops {
                    let pickup = commands
                        .spawn(currency_bundle(config.loot.drop_value, death.position))
                        .id();
                    spawn_events.write(SpawnRequested {
                        entity: pickup,
                        kind: SpawnKind::Currency,
                        position: death.position,
                    });
                }
                currency_events.write(CurrencyAwarded {
                    source: death.entity,
                    drops,
                    value_per_drop: config.loot.drop_value,
                    position: death.position,
                });

                // Оружие врага не выпадает, а уничтожается
                if let Some(weapon) = equipment.get(death.entity).ok().and_then(|equipped| equipped.weapon) {
                    if let Ok(mut entity) = commands.get_entity(weapon) {
                        entity.despawn();
                    }
                }
                if let Ok(mut entity) = commands.get_entity(death.entity) {
                    entity.despawn();
                }

                crate::logger::log_info(&format!(
                    "💀 Hostile {:?} ({:?}) died, {} currency drops",
                    death.entity, death.variant, drops
                ));
            }
        }
    }

    if !hostile_died || progress.player_dead {
        return;
    }

    let remaining = hostiles.iter().filter(|state| !state.is_dead()).count();
    if remaining > 0 {
        return;
    }

    let player_position = players.iter().next().map_or(arena.center(), |position| position.0);
    let area = arena.inset(config.arena.spawn_margin);
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
