//! Hostile AI: стратегия варианта → скорость, FSM, атаки на cooldown.

use bevy::prelude::*;

use crate::ai::{ActorState, AttackRule, Hostile, Lunge, StateInputs};
use crate::combat::{Attacker, DamageIntent, DamageSource, WeaponFireIntent};
use crate::components::{EquippedWeapon, Health, MovementSpeed, Player, Position, Velocity};
use crate::timeline::GameClock;

/// System: намерения врагов
///
/// Цель всегда игрок. Нет живого игрока → враги стоят.
/// Во время выпада (Lunge) враг не принимает решений.
pub fn hostile_intent(
    mut commands: Commands,
    clock: Res<GameClock>,
    players: Query<(Entity, &Position, &Health), With<Player>>,
    mut hostiles: Query<
        (
            Entity,
            &Hostile,
            &Health,
            &Position,
            &MovementSpeed,
            &EquippedWeapon,
            &mut Attacker,
            &mut ActorState,
            &mut Velocity,
            Has<Lunge>,
        ),
        Without<Player>,
    >,
    mut damage_events: EventWriter<DamageIntent>,
    mut fire_events: EventWriter<WeaponFireIntent>,
) {
    let now = clock.now_ms();
    let target = players
        .single()
        .ok()
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, position, _)| (entity, position.0));

    for (entity, hostile, health, position, speed, equipped, mut attacker, mut state, mut velocity, lunging) in
        hostiles.iter_mut()
    {
        if state.is_dead() || !health.is_alive() {
            continue;
        }

        let Some((player, player_position)) = target else {
            velocity.0 = Vec2::ZERO;
            state.advance(&StateInputs::default());
            continue;
        };
        if lunging {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        let intent = hostile.compute_intent(position.0, player_position, speed.speed, attacker.attack_range);
        velocity.0 = intent.velocity;

        let inputs = StateInputs {
            health_depleted: false,
            moving: intent.velocity != Vec2::ZERO,
            attack_triggered: intent.in_attack_range,
        };
        if let Some(previous) = state.advance(&inputs) {
            crate::logger::log(&format!(
                "👾 {} {:?}: {:?} → {:?}",
                hostile.variant.name(),
                entity,
                previous,
                *state
            ));
        }

        if *state != ActorState::Attacking || !attacker.can_attack(now) {
            continue;
        }

        match hostile.attack {
            AttackRule::Strike => {
                damage_events.write(DamageIntent {
                    target: player,
                    amount: attacker.base_damage,
                    source: DamageSource::Strike,
                    instigator: Some(entity),
                });
            }
            AttackRule::Lunge { duration_ms } => {
                damage_events.write(DamageIntent {
                    target: player,
                    amount: attacker.base_damage,
                    source: DamageSource::Strike,
                    instigator: Some(entity),
                });
                commands.entity(entity).insert(Lunge {
                    origin: position.0,
                    target: player_position,
                    started_ms: now,
                    duration_ms,
                });
            }
            AttackRule::Shoot => {
                // Без оружия стрелять нечем, cooldown не тратится
                let Some(weapon) = equipped.weapon else {
                    continue;
                };
                fire_events.write(WeaponFireIntent {
                    weapon,
                    shooter: entity,
                });
            }
        }

        attacker.start_attack(now);
        crate::logger::log(&format!(
            "⚔️ {} {:?} attacks {:?} ({:?})",
            hostile.variant.name(),
            entity,
            player,
            hostile.attack
        ));
    }
}
