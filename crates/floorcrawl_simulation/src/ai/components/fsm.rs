//! ActorState FSM (общая для игрока и врагов)

use bevy::prelude::*;

/// Поведенческое состояние актора
///
/// Ровно одно из четырёх; `Dead` терминальное.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum ActorState {
    #[default]
    Idle,
    Moving,
    /// Игрок: курок зажат и есть оружие. Враг: цель в радиусе атаки.
    Attacking,
    Dead,
}

/// Входы одного шага FSM (вычисляются intent системами каждый тик)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateInputs {
    pub health_depleted: bool,
    /// Ненулевое намерение движения
    pub moving: bool,
    /// Условие атаки выполнено
    pub attack_triggered: bool,
}

impl ActorState {
    pub fn is_dead(&self) -> bool {
        matches!(self, ActorState::Dead)
    }

    /// Следующее состояние по правилам текущего (без скрытых защёлок)
    ///
    /// Смерть проверяется первой, атака приоритетнее Idle/Moving.
    pub fn next(self, inputs: &StateInputs) -> ActorState {
        if self.is_dead() {
            return ActorState::Dead;
        }
        if inputs.health_depleted {
            return ActorState::Dead;
        }

        match self {
            ActorState::Idle | ActorState::Moving if inputs.attack_triggered => ActorState::Attacking,
            ActorState::Idle if inputs.moving => ActorState::Moving,
            ActorState::Moving if !inputs.moving => ActorState::Idle,
            ActorState::Attacking if !inputs.attack_triggered => {
                if inputs.moving {
                    ActorState::Moving
                } else {
                    ActorState::Idle
                }
            }
            current => current,
        }
    }

    /// Применить шаг FSM; возвращает предыдущее состояние если был переход
    pub fn advance(&mut self, inputs: &StateInputs) -> Option<ActorState> {
        let next = self.next(inputs);
        if next == *self {
            return None;
        }
        let previous = *self;
        *self = next;
        Some(previous)
    }
}
