//! Исполнение отложенных действий (reload, lifespan, chain detonation, hit flash).
//!
//! Каждое действие сначала проверяет, что цель жива и всё ещё в нужном
//! состоянии: entity могла исчезнуть между планированием и исполнением.

use bevy::prelude::*;

use crate::combat::{AmmoChanged, DetonationRequested, Projectile, ProjectileDestroyed, ProjectileFate, Weapon};
use crate::components::{HitFlash, Position, Prop};
use crate::timeline::{DeferredAction, DeferredQueue, GameClock};

/// System: все действия с `fire_at ≤ now`, в порядке планирования
///
/// Работает только когда симуляция не заморожена (set gated); во время
/// паузы действия копятся в очереди.
pub fn run_deferred_actions(
    mut commands: Commands,
    clock: Res<GameClock>,
    mut queue: ResMut<DeferredQueue>,
    mut weapons: Query<&mut Weapon>,
    mut projectiles: Query<(&mut Projectile, &Position)>,
    props: Query<&Prop>,
    flashes: Query<&HitFlash>,
    mut ammo_events: EventWriter<AmmoChanged>,
    mut detonation_events: EventWriter<DetonationRequested>,
    mut destroyed_events: EventWriter<ProjectileDestroyed>,
) {
    let now = clock.now_ms();

    while let Some(action) = queue.pop_due(now) {
        match action {
            DeferredAction::ReloadComplete { weapon } => {
                let Ok(mut state) = weapons.get_mut(weapon) else {
                    crate::logger::log(&format!("⏭️ Reload of missing weapon {:?} dropped", weapon));
                    continue;
                };
                if state.finish_reload() {
                    ammo_events.write(AmmoChanged::from_weapon(weapon, &state));
                    crate::logger::log(&format!("✅ Weapon {:?} reloaded ({} rounds)", weapon, state.ammo));
                }
            }
            DeferredAction::ProjectileExpired { projectile } => {
                let Ok((mut state, position)) = projectiles.get_mut(projectile) else {
                    continue;
                };
                if !state.try_consume() {
                    continue;
                }
                state.expiry = None;
                destroyed_events.write(ProjectileDestroyed {
                    projectile,
                    position: position.0,
                    fate: ProjectileFate::Expired,
                });
                commands.entity(projectile).despawn();
            }
            DeferredAction::ChainDetonation { prop } => {
                let Ok(state) = props.get(prop) else {
                    crate::logger::log(&format!("⏭️ Chain detonation of missing prop {:?} dropped", prop));
                    continue;
                };
                if state.active {
                    detonation_events.write(DetonationRequested { prop, cause: None });
                }
            }
            DeferredAction::HitFlashEnd { actor } => {
                // Новое попадание продлило вспышку, снимет более позднее действие
                let Ok(flash) = flashes.get(actor) else {
                    continue;
                };
                if flash.until_ms <= now {
                    if let Ok(mut entity) = commands.get_entity(actor) {
                        entity.remove::<HitFlash>();
                    }
                }
            }
        }
    }
}
