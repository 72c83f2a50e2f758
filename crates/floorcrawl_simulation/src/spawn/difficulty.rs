//! Масштабирование сложности по этажам

use rand::Rng;

use crate::ai::HostileVariant;
use crate::config::DifficultyConfig;

/// Параметры спавна одного этажа (считаются заново каждый этаж)
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnParams {
    pub floor_level: u32,
    pub enemy_count: u32,
    pub prop_count: u32,
    /// Веса вариантов в фиксированном порядке brute → melee → ranged
    pub variant_weights: [(HostileVariant, f32); 3],
}

/// `count = min(floor(base + floor_level * scale), cap)`
fn scaled_count(base: f32, scale: f32, floor_level: u32, cap: u32) -> u32 {
    let raw = (base + floor_level as f32 * scale).floor().max(0.0) as u32;
    raw.min(cap)
}

/// Параметры этажа `floor_level`
///
/// Веса: только brute; melee открывается на `melee_unlock_floor`, ranged на
/// `ranged_unlock_floor`; с `reweight_floor` веса смещаются к сильным врагам.
pub fn calculate_difficulty(floor_level: u32, config: &DifficultyConfig) -> SpawnParams {
    let mut brute = 1.0;
    let mut melee = 0.0;
    let mut ranged = 0.0;

    if floor_level >= config.melee_unlock_floor {
        melee = 1.0;
    }
    if floor_level >= config.ranged_unlock_floor {
        ranged = 1.0;
    }
    if floor_level >= config.reweight_floor {
        brute *= config.reweight_brute;
        melee *= config.reweight_melee;
        ranged *= config.reweight_ranged;
    }

    SpawnParams {
        floor_level,
        enemy_count: scaled_count(config.base_enemies, config.enemy_scale, floor_level, config.enemy_cap),
        prop_count: scaled_count(config.base_props, config.prop_scale, floor_level, config.prop_cap),
        variant_weights: [
            (HostileVariant::Brute, brute),
            (HostileVariant::Melee, melee),
            (HostileVariant::Ranged, ranged),
        ],
    }
}

impl SpawnParams {
    pub fn weight_of(&self, variant: HostileVariant) -> f32 {
        self.variant_weights
            .iter()
            .find(|(candidate, _)| *candidate == variant)
            .map_or(0.0, |(_, weight)| *weight)
    }

    pub fn total_weight(&self) -> f32 {
        self.variant_weights.iter().map(|(_, weight)| weight.max(0.0)).sum()
    }

    /// Выбор варианта: проход по накопленным весам, brute как fallback
    pub fn roll_variant<R: Rng>(&self, rng: &mut R) -> HostileVariant {
        let total = self.total_weight();
        if total <= 0.0 {
            return HostileVariant::Brute;
        }

        let mut roll = rng.gen_range(0.0..total);
        for (variant, weight) in self.variant_weights {
            let weight = weight.max(0.0);
            if roll < weight {
                return variant;
            }
            roll -= weight;
        }
        HostileVariant::Brute
    }
}
