//! World компоненты: границы арены, ящики, выход, валюта

use bevy::prelude::*;

/// Прямоугольник арены (resource, хост может переопределить каждый тик)
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(960.0, 512.0),
        }
    }
}

impl ArenaBounds {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Прямоугольник с отступом от краёв (узкая арена схлопывается в центр)
    pub fn inset(&self, margin: f32) -> ArenaBounds {
        let min = self.min + Vec2::splat(margin);
        let max = self.max - Vec2::splat(margin);
        if min.x > max.x || min.y > max.y {
            let center = self.center();
            return ArenaBounds { min: center, max: center };
        }
        ArenaBounds { min, max }
    }
}

/// Маркер: entity принадлежит текущему уровню (удаляется на teardown)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelEntity;

/// Разрушаемый ящик
///
/// `active == false` → уже взорван, повторные детонации игнорируются.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(LevelEntity)]
pub struct Prop {
    pub active: bool,
    pub blast_radius: f32,
    pub damage_vs_player: u32,
    pub damage_vs_hostile: u32,
}

impl Prop {
    /// Блокировка повторной детонации: true только при первом вызове
    pub fn try_detonate(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        true
    }
}

/// Выход на следующий этаж (появляется когда убит последний враг)
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(LevelEntity)]
pub struct LevelExit;

/// Выпавшая валюта
#[derive(Component, Debug, Clone, Copy)]
#[require(LevelEntity)]
pub struct CurrencyPickup {
    pub value: u32,
}
