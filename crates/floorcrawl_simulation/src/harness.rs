//! Headless harness: App + удобные операции для хоста, runner'а и тестов
//!
//! Хост с рендером обычно работает с `App` напрямую; harness нужен там, где
//! симуляцию гоняют скриптом (smoke runner, интеграционные тесты).

use bevy::prelude::*;

use crate::ai::{AttackRule, HostileVariant};
use crate::components::{EquippedWeapon, Faction, Position};
use crate::config::SimulationConfig;
use crate::session::{begin_level, finish_level, LevelOutcome, SessionState};
use crate::spawn::bundles::{hostile_bundle, owned_weapon_bundle, player_bundle, prop_bundle};
use crate::timeline::TickInput;
use crate::{create_headless_app_with_config, GameClock};

pub struct Harness {
    pub app: App,
}

impl Harness {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimulationConfig::default())
    }

    pub fn with_config(seed: u64, config: SimulationConfig) -> Self {
        Self {
            app: create_headless_app_with_config(seed, config),
        }
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn config(&self) -> SimulationConfig {
        self.world().resource::<SimulationConfig>().clone()
    }

    pub fn input_mut(&mut self) -> Mut<'_, TickInput> {
        self.app.world_mut().resource_mut::<TickInput>()
    }

    /// Один тик на момент `now_ms`
    pub fn tick(&mut self, now_ms: u64) {
        self.input_mut().now_ms = now_ms;
        self.app.update();
    }

    /// Тики с шагом `step_ms` от текущего времени до `until_ms` включительно
    pub fn run_until(&mut self, until_ms: u64, step_ms: u64) {
        let step = step_ms.max(1);
        let mut now = self.world().resource::<GameClock>().now_ms();
        while now < until_ms {
            now = (now + step).min(until_ms);
            self.tick(now);
        }
    }

    /// Забрать все события типа `E`, накопленные с прошлого вызова
    pub fn drain_events<E: Event>(&mut self) -> Vec<E> {
        self.app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    /// Игрок со стартовым оружием → (игрок, оружие)
    pub fn spawn_armed_player(&mut self, position: Vec2) -> (Entity, Entity) {
        let config = self.config();
        let world = self.app.world_mut();
        let player = world.spawn(player_bundle(&config, position)).id();
        let weapon = world
            .spawn(owned_weapon_bundle(&config, player, Faction::Player, position))
            .id();
        world.entity_mut(player).insert(EquippedWeapon { weapon: Some(weapon) });
        (player, weapon)
    }

    /// Враг варианта `variant` (стрелок сразу с оружием), спавн в момент `now_ms`
    pub fn spawn_hostile(&mut self, variant: HostileVariant, position: Vec2, now_ms: u64) -> Entity {
        let config = self.config();
        let world = self.app.world_mut();
        let hostile = world.spawn(hostile_bundle(&config, variant, position, now_ms)).id();

        if config.variants.profile(variant).attack == AttackRule::Shoot {
            let gun = world
                .spawn(owned_weapon_bundle(&config, hostile, Faction::Hostile, position))
                .id();
            world.entity_mut(hostile).insert(EquippedWeapon { weapon: Some(gun) });
        }
        hostile
    }

    pub fn spawn_prop(&mut self, position: Vec2) -> Entity {
        let config = self.config();
        self.app.world_mut().spawn(prop_bundle(&config, position)).id()
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world().get::<Position>(entity).map(|position| position.0)
    }

    pub fn begin_level(&mut self, session: SessionState) {
        begin_level(self.app.world_mut(), session);
    }

    pub fn finish_level(&mut self) -> (SessionState, LevelOutcome) {
        finish_level(self.app.world_mut())
    }
}
