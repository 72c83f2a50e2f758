//! Arcade движение: интеграция скоростей, границы арены, ящики-препятствия
//!
//! Никакой физики: скорость по осям × delta тика, позиция обрезается
//! прямоугольником арены. Ящики только блокируют (выталкивание по нормали).

use bevy::prelude::*;

use crate::ai::{ActorState, Lunge};
use crate::combat::Projectile;
use crate::components::{Actor, ArenaBounds, Position, Prop, Velocity};
use crate::config::SimulationConfig;
use crate::timeline::GameClock;

/// System: интеграция скорости акторов + clamp в арену
///
/// Мёртвые и выполняющие выпад не двигаются этой системой.
pub fn integrate_actor_velocity(
    clock: Res<GameClock>,
    arena: Res<ArenaBounds>,
    mut actors: Query<(&mut Position, &Velocity, &ActorState), (With<Actor>, Without<Lunge>)>,
) {
    let delta = clock.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut position, velocity, state) in actors.iter_mut() {
        if state.is_dead() || !velocity.is_moving() {
            continue;
        }
        position.0 = arena.clamp(position.0 + velocity.0 * delta);
    }
}

/// System: выпад melee врага (tween к цели и обратно)
pub fn animate_lunges(
    mut commands: Commands,
    clock: Res<GameClock>,
    arena: Res<ArenaBounds>,
    mut lunging: Query<(Entity, &mut Position, &Lunge), With<Actor>>,
) {
    let now = clock.now_ms();

    for (entity, mut position, lunge) in lunging.iter_mut() {
        match lunge.position_at(now) {
            Some(point) => position.0 = arena.clamp(point),
            None => {
                position.0 = arena.clamp(lunge.origin);
                commands.entity(entity).remove::<Lunge>();
            }
        }
    }
}

/// System: акторы не проходят сквозь активные ящики
pub fn block_actors_by_props(
    config: Res<SimulationConfig>,
    arena: Res<ArenaBounds>,
    mut actors: Query<&mut Position, (With<Actor>, Without<Prop>)>,
    props: Query<(&Prop, &Position), Without<Actor>>,
) {
    let min_distance = config.level.actor_radius + config.level.prop_radius;

    for mut position in actors.iter_mut() {
        for (prop, prop_position) in props.iter() {
            if !prop.active {
                continue;
            }
            let offset = position.0 - prop_position.0;
            let distance = offset.length();
            if distance >= min_distance {
                continue;
            }
            // Совпадающие центры: выталкиваем по +X
            let normal = if distance > f32::EPSILON { offset / distance } else { Vec2::X };
            position.0 = arena.clamp(prop_position.0 + normal * min_distance);
        }
    }
}

/// System: полёт снарядов (за пределами арены их уничтожает collision system)
pub fn move_projectiles(clock: Res<GameClock>, mut projectiles: Query<(&mut Position, &Velocity, &Projectile)>) {
    let delta = clock.delta_secs();
    if delta <= 0.0 {
        return;
    }

    for (mut position, velocity, projectile) in projectiles.iter_mut() {
        if projectile.is_active() {
            position.0 += velocity.0 * delta;
        }
    }
}
