//! Конфигурация симуляции
//!
//! Все числа баланса в одном месте, Default = базовый баланс.
//! Хост может загрузить `SimulationConfig` из JSON/RON (serde) и вставить
//! resource до `SimulationPlugin`, plugin не перезапишет его.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{AttackRule, HostileVariant, MovementRule, VariantProfile};
use crate::components::ArenaBounds;

/// Корневой конфиг (resource)
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub arena: ArenaConfig,
    pub weapon: WeaponConfig,
    pub projectile: ProjectileConfig,
    pub explosion: ExplosionConfig,
    pub difficulty: DifficultyConfig,
    pub placement: PlacementConfig,
    pub loot: LootConfig,
    pub level: LevelConfig,
    pub variants: VariantTable,
}

/// Размер арены и отступ для спавна от краёв
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub spawn_margin: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 512.0,
            spawn_margin: 100.0,
        }
    }
}

impl ArenaConfig {
    pub fn bounds(&self) -> ArenaBounds {
        ArenaBounds {
            min: Vec2::ZERO,
            max: Vec2::new(self.width, self.height),
        }
    }

    /// Прямоугольник, из которого SpawnDirector сэмплирует позиции
    pub fn spawn_area(&self) -> ArenaBounds {
        self.bounds().inset(self.spawn_margin)
    }
}

/// Стартовое оружие игрока (и оружие ranged врагов)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub max_ammo: u32,
    pub fire_delay_ms: u64,
    pub reload_ms: u64,
    /// Смещение дула вдоль оси прицела
    pub muzzle_offset: f32,
    /// Урон пули игрока (у врагов урон берётся из их attack_damage)
    pub damage: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            max_ammo: 30,
            fire_delay_ms: 100, // 10 выстрелов/сек
            reload_ms: 1000,
            muzzle_offset: 22.0,
            damage: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub lifespan_ms: u64,
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 1000.0,
            lifespan_ms: 1000,
            radius: 4.0,
        }
    }
}

/// Взрыв ящика
///
/// База урона по игроку и по врагам разная (50 / 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionConfig {
    pub radius: f32,
    pub damage_vs_player: u32,
    pub damage_vs_hostile: u32,
    pub chain_delay_ms: u64,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            radius: 350.0,
            damage_vs_player: 50,
            damage_vs_hostile: 100,
            chain_delay_ms: 100,
        }
    }
}

/// Масштабирование сложности по этажам
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub base_enemies: f32,
    pub enemy_scale: f32,
    pub enemy_cap: u32,
    pub base_props: f32,
    pub prop_scale: f32,
    pub prop_cap: u32,
    pub melee_unlock_floor: u32,
    pub ranged_unlock_floor: u32,
    pub reweight_floor: u32,
    pub reweight_brute: f32,
    pub reweight_melee: f32,
    pub reweight_ranged: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            base_enemies: 2.0,
            enemy_scale: 0.5,
            enemy_cap: 50,
            base_props: 1.0,
            prop_scale: 0.3,
            prop_cap: 5,
            melee_unlock_floor: 3,
            ranged_unlock_floor: 5,
            reweight_floor: 7,
            reweight_brute: 0.5,
            reweight_melee: 1.5,
            reweight_ranged: 2.0,
        }
    }
}

/// Rejection sampling для спавна
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Враги и ящики строго дальше этого расстояния от игрока
    pub min_separation: f32,
    /// Выход с уровня строго дальше этого расстояния от игрока
    pub exit_min_separation: f32,
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_separation: 200.0,
            exit_min_separation: 100.0,
            max_attempts: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootConfig {
    pub min_drops: u32,
    pub max_drops: u32,
    pub drop_value: u32,
    pub pickup_radius: f32,
}

impl Default for LootConfig {
    fn default() -> Self {
        Self {
            min_drops: 1,
            max_drops: 3,
            drop_value: 10,
            pickup_radius: 24.0,
        }
    }
}

/// Прочие параметры уровня
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Заморозка-отсчёт на старте уровня
    pub countdown_ms: u64,
    pub exit_radius: f32,
    pub weapon_pickup_range: f32,
    pub player_speed: f32,
    pub player_health: u32,
    /// Радиус тела актора (коллизии со снарядами и ящиками)
    pub actor_radius: f32,
    pub prop_radius: f32,
    pub hit_flash_ms: u64,
    /// Дополнительная задержка перед первым выстрелом ranged врага
    pub ranged_first_shot_delay_ms: u64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            countdown_ms: 3000,
            exit_radius: 32.0,
            weapon_pickup_range: 50.0,
            player_speed: 200.0,
            player_health: 100,
            actor_radius: 16.0,
            prop_radius: 16.0,
            hit_flash_ms: 100,
            ranged_first_shot_delay_ms: 2000,
        }
    }
}

/// Stat block + стратегия для каждого варианта врага
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantTable {
    pub brute: VariantProfile,
    pub melee: VariantProfile,
    pub ranged: VariantProfile,
}

impl VariantTable {
    pub fn profile(&self, variant: HostileVariant) -> &VariantProfile {
        match variant {
            HostileVariant::Brute => &self.brute,
            HostileVariant::Melee => &self.melee,
            HostileVariant::Ranged => &self.ranged,
        }
    }
}

impl Default for VariantTable {
    fn default() -> Self {
        Self {
            brute: VariantProfile {
                max_health: 100,
                speed: 100.0,
                attack_range: 50.0,
                attack_cooldown_ms: 1000,
                attack_damage: 10,
                movement: MovementRule::Advance,
                attack: AttackRule::Strike,
            },
            melee: VariantProfile {
                max_health: 150,
                speed: 150.0,
                attack_range: 50.0,
                attack_cooldown_ms: 1000,
                attack_damage: 25,
                movement: MovementRule::Advance,
                attack: AttackRule::Lunge { duration_ms: 200 },
            },
            ranged: VariantProfile {
                max_health: 120,
                speed: 80.0,
                attack_range: 300.0,
                attack_cooldown_ms: 2000,
                attack_damage: 15,
                movement: MovementRule::KeepBand,
                attack: AttackRule::Shoot,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_area_respects_margin() {
        let arena = ArenaConfig::default();
        let area = arena.spawn_area();
        assert_eq!(area.min, Vec2::new(100.0, 100.0));
        assert_eq!(area.max, Vec2::new(860.0, 412.0));
    }

    #[test]
    fn test_spawn_area_collapses_when_margin_too_wide() {
        let arena = ArenaConfig {
            width: 150.0,
            height: 150.0,
            spawn_margin: 100.0,
        };
        let area = arena.spawn_area();
        assert_eq!(area.min, area.max);
        assert_eq!(area.min, Vec2::new(75.0, 75.0));
    }

    #[test]
    fn test_default_variant_table_matches_roster() {
        let table = VariantTable::default();
        assert_eq!(table.melee.max_health, 150);
        assert_eq!(table.ranged.attack_range, 300.0);
        assert_eq!(table.brute.attack_damage, 10);
        assert!(matches!(table.melee.attack, AttackRule::Lunge { .. }));
    }
}
