//! Floorcrawl Simulation Core
//!
//! Боевая ECS-симуляция (Bevy 0.16) для top-down roguelike: игрок и враги
//! дерутся на арене, оружие стреляет снарядами, ящики взрываются цепочкой.
//!
//! Слои:
//! - timeline: GameClock, SimulationFreeze (pause gate), DeferredQueue
//! - combat: WeaponController, Projectile, CombatResolver (коллизии, взрывы, смерти)
//! - ai: ActorState FSM + variant strategies (player, melee, ranged, brute)
//! - spawn: SpawnDirector (difficulty scaling + placement)
//! - session: SessionState между этажами (передаётся явно, без глобалов)
//!
//! Хост (рендер/ввод/сцены) пишет `TickInput` и вызывает `App::update()` раз в кадр.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod harness;
pub mod logger;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod timeline;

// Re-export базовых компонентов для удобства
pub use ai::{ActorState, AIPlugin, Hostile, HostileVariant, StateInputs, VariantProfile};
pub use combat::{
    explosion_damage, ActorDied, AmmoChanged, CombatPlugin, CurrencyAwarded, DamageDealt, DamageSource,
    HealthChanged, Projectile, Weapon, WeaponControl,
};
pub use components::*;
pub use config::SimulationConfig;
pub use harness::Harness;
pub use logger::{log, log_error, log_info, log_warning};
pub use session::{begin_level, finish_level, LevelOutcome, LevelProgress, SessionState};
pub use spawn::{calculate_difficulty, SpawnParams, SpawnPlugin, SpawnRequested};
pub use timeline::{DeferredAction, DeferredQueue, GameClock, SimulationFreeze, TickInput, TimelinePlugin};

/// Порядок фаз одного тика
///
/// `Clock` и `Level` работают всегда, остальные только когда симуляция не заморожена.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// TickInput → GameClock, снятие таймерной заморозки
    Clock,
    /// Старт уровня (SpawnDirector)
    Level,
    /// Отложенные действия (reload, lifespan, chain detonation)
    Deferred,
    /// Намерения акторов (player input, hostile AI)
    Intent,
    /// Прицеливание и стрельба
    Weapons,
    /// Интеграция скоростей, границы арены, блокировка пропами
    Motion,
    /// Коллизии снарядов
    Collision,
    /// Взрывы, урон, смерти
    Resolution,
    /// Валюта, выход с уровня
    Bookkeeping,
}

/// Run condition: глобальный pause gate
pub fn simulation_running(freeze: Res<SimulationFreeze>) -> bool {
    !freeze.is_frozen()
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SimulationConfig>() {
            app.insert_resource(SimulationConfig::default());
        }
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            Update,
            (
                SimulationSet::Clock,
                SimulationSet::Level,
                SimulationSet::Deferred,
                SimulationSet::Intent,
                SimulationSet::Weapons,
                SimulationSet::Motion,
                SimulationSet::Collision,
                SimulationSet::Resolution,
                SimulationSet::Bookkeeping,
            )
                .chain(),
        )
        .configure_sets(
            Update,
            (
                SimulationSet::Deferred,
                SimulationSet::Intent,
                SimulationSet::Weapons,
                SimulationSet::Motion,
                SimulationSet::Collision,
                SimulationSet::Resolution,
                SimulationSet::Bookkeeping,
            )
                .run_if(simulation_running),
        )
        .add_plugins((
            TimelinePlugin,
            SpawnPlugin,
            AIPlugin,
            CombatPlugin,
            physics::MovementPlugin,
            session::SessionPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт headless App с полной симуляцией
///
/// Время ведёт хост через `TickInput::now_ms`, Bevy `Time` не используется.
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_config(seed, SimulationConfig::default())
}

/// То же, что `create_headless_app`, но с явным конфигом (тесты, тюнинг баланса)
pub fn create_headless_app_with_config(seed: u64, config: SimulationConfig) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
