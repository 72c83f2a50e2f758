//! Rejection sampling позиций для спавна (с ограничением попыток)

use bevy::prelude::*;
use rand::Rng;
use thiserror::Error;

use crate::components::ArenaBounds;

/// Recoverable: ограничение расстояния невыполнимо для данной арены
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlacementError {
    #[error("no position farther than {min_separation} from {anchor:?} after {attempts} attempts")]
    Exhausted {
        attempts: u32,
        min_separation: f32,
        anchor: Vec2,
        /// Самый далёкий от якоря кандидат (best effort)
        best: Vec2,
    },
}

impl PlacementError {
    /// Позиция для fallback (самый далёкий кандидат)
    pub fn fallback(&self) -> Vec2 {
        match self {
            PlacementError::Exhausted { best, .. } => *best,
        }
    }
}

/// Равномерная точка внутри `area`, строго дальше `min_separation` от `anchor`
pub fn sample_position<R: Rng>(
    rng: &mut R,
    area: ArenaBounds,
    anchor: Vec2,
    min_separation: f32,
    max_attempts: u32,
) -> Result<Vec2, PlacementError> {
    let attempts = max_attempts.max(1);
    let mut best = area.center();
    let mut best_distance = f32::NEG_INFINITY;

    for _ in 0..attempts {
        let candidate = Vec2::new(
            rng.gen_range(area.min.x..=area.max.x),
            rng.gen_range(area.min.y..=area.max.y),
        );
        let distance = candidate.distance(anchor);
        if distance > min_separation {
            return Ok(candidate);
        }
        if distance > best_distance {
            best = candidate;
            best_distance = distance;
        }
    }

    Err(PlacementError::Exhausted {
        attempts,
        min_separation,
        anchor,
        best,
    })
}

/// `sample_position` + log warning и fallback вместо ошибки (никогда не зависает)
pub fn place_or_fallback<R: Rng>(
    rng: &mut R,
    area: ArenaBounds,
    anchor: Vec2,
    min_separation: f32,
    max_attempts: u32,
    label: &str,
) -> Vec2 {
    match sample_position(rng, area, anchor, min_separation, max_attempts) {
        Ok(position) => position,
        Err(error) => {
            let fallback = error.fallback();
            crate::logger::log_warning(&format!(
                "⚠️ Placement of {} failed: {}, using best effort {:?}",
                label, error, fallback
            ));
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn default_area() -> ArenaBounds {
        ArenaBounds {
            min: Vec2::new(100.0, 100.0),
            max: Vec2::new(860.0, 412.0),
        }
    }

    #[test]
    fn test_sampled_position_respects_separation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let anchor = Vec2::new(480.0, 256.0);

        for _ in 0..100 {
            let position = sample_position(&mut rng, default_area(), anchor, 200.0, 1000).unwrap();
            assert!(position.distance(anchor) > 200.0);
            assert!(default_area().contains(position));
        }
    }

    #[test]
    fn test_unsatisfiable_separation_is_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let anchor = Vec2::new(480.0, 256.0);

        let result = sample_position(&mut rng, default_area(), anchor, 10_000.0, 50);

        let Err(error) = result else {
            panic!("separation larger than the arena must fail");
        };
        assert!(matches!(error, PlacementError::Exhausted { attempts: 50, .. }));
        assert!(default_area().contains(error.fallback()));
    }

    #[test]
    fn test_fallback_never_hangs() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let area = ArenaBounds {
            min: Vec2::splat(10.0),
            max: Vec2::splat(10.0),
        };

        // Точка совпадает с якорем: ограничение невыполнимо, но ответ есть
        let position = place_or_fallback(&mut rng, area, Vec2::splat(10.0), 1.0, 0, "test");
        assert_eq!(position, Vec2::splat(10.0));
    }
}
