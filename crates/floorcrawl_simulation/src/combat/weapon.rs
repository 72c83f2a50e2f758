//! WeaponController: оружие как отдельная entity
//!
//! Оружие живёт независимо от владельца: переживает drop/pickup, лежит на
//! арене без владельца. Недопустимые операции: no-op с `false`, а не ошибки.

use bevy::prelude::*;

use crate::components::{Faction, LevelEntity, Position};

/// Кто управляет прицелом
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponControl {
    /// Прицел = точка курсора игрока (TickInput::aim_target)
    PlayerAimed,
    /// Прицел = позиция игрока (оружие врага)
    AiAimed,
}

/// Состояние оружия
///
/// Инвариант: 0 ≤ ammo ≤ max_ammo.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Position, LevelEntity)]
pub struct Weapon {
    /// Владелец (None = лежит на арене)
    pub owner: Option<Entity>,
    pub ammo: u32,
    pub max_ammo: u32,
    pub fire_delay_ms: u64,
    pub reload_ms: u64,
    /// None = ещё не стреляло (первый выстрел без задержки)
    pub last_fired_ms: Option<u64>,
    pub reloading: bool,
    pub control: WeaponControl,
    /// Угол прицела (радианы, 0 = +X)
    pub aim_angle: f32,
    /// Курок зажат (auto-fire каждый тик)
    pub trigger_held: bool,
    /// Урон пули (если у владельца нет своего Attacker)
    pub damage: u32,
    /// Смещение дула вдоль оси прицела
    pub muzzle_offset: f32,
    /// Лежит на арене и доступно для подбора
    pub dropped: bool,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            owner: None,
            ammo: 30,
            max_ammo: 30,
            fire_delay_ms: 100,
            reload_ms: 1000,
            last_fired_ms: None,
            reloading: false,
            control: WeaponControl::PlayerAimed,
            aim_angle: 0.0,
            trigger_held: false,
            damage: 10,
            muzzle_offset: 22.0,
            dropped: false,
        }
    }
}

impl Weapon {
    pub fn from_config(config: &crate::config::WeaponConfig) -> Self {
        Self {
            ammo: config.max_ammo,
            max_ammo: config.max_ammo,
            fire_delay_ms: config.fire_delay_ms,
            reload_ms: config.reload_ms,
            damage: config.damage,
            muzzle_offset: config.muzzle_offset,
            ..Default::default()
        }
    }

    /// Cooldown выстрела истёк (`now - last_fired ≥ fire_delay`)
    pub fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms
                .checked_sub(last)
                .is_some_and(|elapsed| elapsed >= self.fire_delay_ms),
        }
    }

    pub fn can_fire(&self, now_ms: u64) -> bool {
        !self.reloading && self.ammo > 0 && self.cooldown_elapsed(now_ms)
    }

    /// Выстрел: −1 патрон, запоминаем время. false = no-op.
    ///
    /// Снаряд создаёт вызывающая система (нужны Commands + DeferredQueue).
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if !self.can_fire(now_ms) {
            return false;
        }
        self.ammo -= 1;
        self.last_fired_ms = Some(now_ms);
        true
    }

    /// Начать перезарядку. false = уже перезаряжается (no-op).
    ///
    /// Завершение планирует вызывающая система (`DeferredAction::ReloadComplete`).
    pub fn begin_reload(&mut self) -> bool {
        if self.reloading {
            return false;
        }
        self.reloading = true;
        true
    }

    /// Завершение перезарядки. false если перезарядки не было (liveness guard).
    pub fn finish_reload(&mut self) -> bool {
        if !self.reloading {
            return false;
        }
        self.ammo = self.max_ammo;
        self.reloading = false;
        true
    }

    /// Пустой магазин, перезарядка ещё не идёт
    pub fn needs_reload(&self) -> bool {
        self.ammo == 0 && !self.reloading
    }

    /// Повернуть прицел от `origin` к `target` (при совпадении точек угол не меняется)
    pub fn aim_at(&mut self, origin: Vec2, target: Vec2) {
        let delta = target - origin;
        if delta.length_squared() > f32::EPSILON {
            self.aim_angle = delta.y.atan2(delta.x);
        }
    }

    /// Единичный вектор прицела
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.aim_angle)
    }

    /// Точка вылета снаряда (дуло, повёрнутое по углу прицела)
    pub fn muzzle_position(&self, origin: Vec2) -> Vec2 {
        origin + self.direction() * self.muzzle_offset
    }

    /// Прикрепить к новому владельцу
    ///
    /// Ammo сбрасывается в max ТОЛЬКО когда подбирает игрок (враг получает
    /// оружие с текущим магазином).
    pub fn attach_to(&mut self, owner: Entity, faction: Faction) {
        self.owner = Some(owner);
        self.dropped = false;
        self.trigger_held = false;
        self.control = match faction {
            Faction::Player => WeaponControl::PlayerAimed,
            Faction::Hostile => WeaponControl::AiAimed,
        };
        if faction == Faction::Player {
            self.ammo = self.max_ammo;
        }
    }

    /// Бросить: владелец сброшен, оружие доступно для подбора, AI-контроль выключен
    pub fn detach(&mut self) -> Option<Entity> {
        let previous = self.owner.take();
        self.dropped = true;
        self.trigger_held = false;
        self.control = WeaponControl::PlayerAimed;
        previous
    }
}

/// Event: AI хочет выстрелить из своего оружия (ranged враг на cooldown)
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponFireIntent {
    pub weapon: Entity,
    pub shooter: Entity,
}

/// Event: выстрел состоялся (снаряд создан)
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponFired {
    pub weapon: Entity,
    pub shooter: Option<Entity>,
    pub projectile: Entity,
    pub muzzle: Vec2,
    pub angle: f32,
}

/// Event: запрос перезарядки (кнопка R или auto-reload)
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadRequested {
    pub weapon: Entity,
}

/// Event: актор хочет подобрать ближайшее оружие (или бросить своё)
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponPickupRequested {
    pub actor: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponPickedUp {
    pub weapon: Entity,
    pub owner: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponDropped {
    pub weapon: Entity,
    pub position: Vec2,
}

/// Event: HUD счётчик патронов
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmoChanged {
    pub weapon: Entity,
    pub owner: Option<Entity>,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
}

impl AmmoChanged {
    pub fn from_weapon(entity: Entity, weapon: &Weapon) -> Self {
        Self {
            weapon: entity,
            owner: weapon.owner,
            ammo: weapon.ammo,
            max_ammo: weapon.max_ammo,
            reloading: weapon.reloading,
        }
    }
}
