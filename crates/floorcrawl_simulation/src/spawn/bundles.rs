//! Сборка entity уровня (игрок, враги, оружие, ящики, выход, валюта)
//!
//! Функции возвращают bundle, связь оружие ↔ владелец ставит вызывающий
//! (нужны id обеих entity).

use bevy::prelude::*;

use crate::ai::{AttackRule, Hostile, HostileVariant};
use crate::combat::{Attacker, Weapon};
use crate::components::{
    Actor, CurrencyPickup, Faction, Health, LevelExit, MovementSpeed, Player, Position, Prop,
};
use crate::config::SimulationConfig;

pub fn player_bundle(config: &SimulationConfig, position: Vec2) -> impl Bundle {
    (
        Player,
        Actor {
            faction: Faction::Player,
        },
        Health::new(config.level.player_health),
        MovementSpeed {
            speed: config.level.player_speed,
        },
        Position(position),
    )
}

/// Враг варианта `variant`; стрелку первая атака откладывается на
/// `ranged_first_shot_delay_ms` (плюс обычный cooldown).
pub fn hostile_bundle(config: &SimulationConfig, variant: HostileVariant, position: Vec2, now_ms: u64) -> impl Bundle {
    let profile = config.variants.profile(variant);
    let last_attack_ms = match profile.attack {
        AttackRule::Shoot => Some(now_ms.saturating_add(config.level.ranged_first_shot_delay_ms)),
        AttackRule::Strike | AttackRule::Lunge { .. } => None,
    };

    (
        Actor {
            faction: Faction::Hostile,
        },
        Hostile::from_profile(variant, profile),
        Health::new(profile.max_health),
        MovementSpeed { speed: profile.speed },
        Attacker {
            base_damage: profile.attack_damage,
            attack_cooldown_ms: profile.attack_cooldown_ms,
            attack_range: profile.attack_range,
            last_attack_ms,
        },
        Position(position),
    )
}

/// Оружие, сразу прикреплённое к владельцу
pub fn owned_weapon_bundle(config: &SimulationConfig, owner: Entity, faction: Faction, position: Vec2) -> impl Bundle {
    let mut weapon = Weapon::from_config(&config.weapon);
    weapon.attach_to(owner, faction);
    (weapon, Position(position))
}

pub fn prop_bundle(config: &SimulationConfig, position: Vec2) -> impl Bundle {
    (
        Prop {
            active: true,
            blast_radius: config.explosion.radius,
            damage_vs_player: config.explosion.damage_vs_player,
            damage_vs_hostile: config.explosion.damage_vs_hostile,
        },
        Position(position),
    )
}

pub fn exit_bundle(position: Vec2) -> impl Bundle {
    (LevelExit, Position(position))
}

pub fn currency_bundle(value: u32, position: Vec2) -> impl Bundle {
    (CurrencyPickup { value }, Position(position))
}
