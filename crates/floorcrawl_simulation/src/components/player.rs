//! Player marker

use bevy::prelude::*;

/// Маркер: актор управляется игроком (ввод из `TickInput`)
///
/// Ровно один на уровень.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
