//! Projectile systems: коллизии снарядов (актор / ящик / стена).

use bevy::prelude::*;

use crate::combat::{
    DamageIntent, DamageSource, DetonationRequested, Projectile, ProjectileDestroyed, ProjectileFate,
};
use crate::components::{Actor, ArenaBounds, Health, Position, Prop};
use crate::config::SimulationConfig;
use crate::timeline::DeferredQueue;

/// System: коллизии снарядов
///
/// Первый подходящий контакт уничтожает снаряд (попадание в актора
/// противоположной фракции → урон; в ящик → детонация; выход за арену →
/// стена). Свои акторы игнорируются (friendly fire нет).
pub fn resolve_projectile_collisions(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    arena: Res<ArenaBounds>,
    mut queue: ResMut<DeferredQueue>,
    mut projectiles: Query<(Entity, &mut Projectile, &Position)>,
    actors: Query<(Entity, &Actor, &Health, &Position), Without<Projectile>>,
    props: Query<(Entity, &Prop, &Position), Without<Projectile>>,
    mut damage_events: EventWriter<DamageIntent>,
    mut detonation_events: EventWriter<DetonationRequested>,
    mut destroyed_events: EventWriter<ProjectileDestroyed>,
) {
    let actor_radius = config.level.actor_radius;
    let prop_radius = config.level.prop_radius;

    for (entity, mut projectile, position) in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        let point = position.0;

        let fate = if !arena.contains(point) {
            Some(ProjectileFate::HitWall)
        } else if let Some(target) = nearest_actor_hit(&projectile, point, actor_radius, &actors) {
            Some(ProjectileFate::HitActor(target))
        } else {
            props
                .iter()
                .filter(|(_, prop, _)| prop.active)
                .map(|(prop_entity, _, prop_position)| (prop_entity, prop_position.0.distance(point)))
                .filter(|(_, distance)| *distance <= prop_radius + projectile.radius)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(prop_entity, _)| ProjectileFate::HitProp(prop_entity))
        };

        let Some(fate) = fate else {
            continue;
        };

        // Единственная точка уничтожения по коллизии: после неё снаряд неактивен
        if !projectile.try_consume() {
            continue;
        }
        if let Some(expiry) = projectile.expiry.take() {
            queue.cancel(expiry);
        }

        match fate {
            ProjectileFate::HitActor(target) => {
                damage_events.write(DamageIntent {
                    target,
                    amount: projectile.damage,
                    source: DamageSource::Projectile,
                    instigator: projectile.shooter,
                });
                crate::logger::log(&format!(
                    "🎯 Projectile {:?} hit actor {:?} (dmg {})",
                    entity, target, projectile.damage
                ));
            }
            ProjectileFate::HitProp(prop) => {
                detonation_events.write(DetonationRequested {
                    prop,
                    cause: Some(entity),
                });
                crate::logger::log(&format!("🎯 Projectile {:?} hit prop {:?}", entity, prop));
            }
            ProjectileFate::HitWall | ProjectileFate::Expired => {}
        }

        destroyed_events.write(ProjectileDestroyed {
            projectile: entity,
            position: point,
            fate,
        });
        commands.entity(entity).despawn();
    }
}

/// Ближайший живой актор противоположной фракции в радиусе касания
fn nearest_actor_hit(
    projectile: &Projectile,
    point: Vec2,
    actor_radius: f32,
    actors: &Query<(Entity, &Actor, &Health, &Position), Without<Projectile>>,
) -> Option<Entity> {
    actors
        .iter()
        .filter(|(_, actor, health, _)| health.is_alive() && projectile.can_damage(actor.faction))
        .map(|(entity, _, _, position)| (entity, position.0.distance(point)))
        .filter(|(_, distance)| *distance <= actor_radius + projectile.radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity)
}
