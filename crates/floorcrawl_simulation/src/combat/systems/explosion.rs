//! Explosion systems: детонация ящиков и цепная реакция.

use bevy::prelude::*;

use crate::combat::{explosion_damage, DamageIntent, DamageSource, DetonationRequested, ExplosionOccurred};
use crate::components::{Actor, Faction, Health, Position, Prop};
use crate::config::SimulationConfig;
use crate::timeline::{DeferredAction, DeferredQueue, GameClock};

/// System: детонация ящиков
///
/// 1. Ящик помечается неактивным ДО планирования вторичных детонаций:
///    повторный запрос того же ящика (в этом тике или позже) игнорируется.
/// 2. Урон всем живым акторам в радиусе (по игроку и врагам разная база).
/// 3. Каждому активному ящику в радиусе `ChainDetonation` через chain_delay.
pub fn process_detonations(
    mut commands: Commands,
    clock: Res<GameClock>,
    config: Res<SimulationConfig>,
    mut queue: ResMut<DeferredQueue>,
    mut requests: EventReader<DetonationRequested>,
    mut props: Query<(Entity, &mut Prop, &Position)>,
    actors: Query<(Entity, &Actor, &Health, &Position), Without<Prop>>,
    mut damage_events: EventWriter<DamageIntent>,
    mut explosion_events: EventWriter<ExplosionOccurred>,
) {
    let now = clock.now_ms();

    for request in requests.read() {
        let Ok((_, mut prop, position)) = props.get_mut(request.prop) else {
            crate::logger::log(&format!("💨 Detonation of missing prop {:?} skipped", request.prop));
            continue;
        };
        if !prop.try_detonate() {
            continue;
        }

        let epicenter = position.0;
        let blast = *prop;

        for (actor_entity, actor, health, actor_position) in actors.iter() {
            if !health.is_alive() {
                continue;
            }
            let base = match actor.faction {
                Faction::Player => blast.damage_vs_player,
                Faction::Hostile => blast.damage_vs_hostile,
            };
            let damage = explosion_damage(base, actor_position.0.distance(epicenter), blast.blast_radius);
            if damage == 0 {
                continue;
            }
            damage_events.write(DamageIntent {
                target: actor_entity,
                amount: damage,
                source: DamageSource::Explosion,
                instigator: Some(request.prop),
            });
        }

        let mut chained = 0;
        for (other, other_prop, other_position) in props.iter() {
            if other == request.prop || !other_prop.active {
                continue;
            }
            if other_position.0.distance(epicenter) < blast.blast_radius {
                queue.schedule(
                    now.saturating_add(config.explosion.chain_delay_ms),
                    DeferredAction::ChainDetonation { prop: other },
                );
                chained += 1;
            }
        }

        crate::logger::log_info(&format!(
            "💥 Prop {:?} exploded at {:?} (radius {}, {} chained)",
            request.prop, epicenter, blast.blast_radius, chained
        ));

        explosion_events.write(ExplosionOccurred {
            prop: request.prop,
            position: epicenter,
            radius: blast.blast_radius,
            chained,
        });
        commands.entity(request.prop).despawn();
    }
}
