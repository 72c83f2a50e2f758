//! Взрыв ящика: линейное затухание урона + цепная реакция

use bevy::prelude::*;

/// Урон взрыва на дистанции `distance`: `floor(base * (1 - d/R))` при d < R, иначе 0
///
/// Монотонно не возрастает с ростом d. При `radius ≤ 0` урон 0.
pub fn explosion_damage(base: u32, distance: f32, radius: f32) -> u32 {
    if radius <= 0.0 || !(distance < radius) {
        return 0;
    }
    let falloff = 1.0 - distance.max(0.0) / radius;
    (base as f32 * falloff).floor() as u32
}

/// Event: запрос детонации ящика (попадание снаряда или цепная реакция)
#[derive(Event, Debug, Clone, Copy)]
pub struct DetonationRequested {
    pub prop: Entity,
    /// Снаряд или ящик-инициатор
    pub cause: Option<Entity>,
}

/// Event: ящик взорвался (для хоста: звук, частицы, тряска камеры)
#[derive(Event, Debug, Clone, Copy)]
pub struct ExplosionOccurred {
    pub prop: Entity,
    pub position: Vec2,
    pub radius: f32,
    /// Сколько ящиков поставлено в очередь на вторичную детонацию
    pub chained: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_damage_at_half_radius() {
        assert_eq!(explosion_damage(100, 175.0, 350.0), 50);
        assert_eq!(explosion_damage(50, 175.0, 350.0), 25);
    }

    #[test]
    fn test_explosion_damage_edges() {
        assert_eq!(explosion_damage(100, 0.0, 350.0), 100);
        assert_eq!(explosion_damage(100, 350.0, 350.0), 0);
        assert_eq!(explosion_damage(100, 500.0, 350.0), 0);
        assert_eq!(explosion_damage(100, 10.0, 0.0), 0);
    }

    #[test]
    fn test_explosion_damage_non_increasing() {
        let mut previous = u32::MAX;
        for step in 0..=70 {
            let distance = step as f32 * 5.0;
            let damage = explosion_damage(100, distance, 350.0);
            assert!(damage <= previous, "d = {} → {} > {}", distance, damage, previous);
            previous = damage;
        }
    }
}
