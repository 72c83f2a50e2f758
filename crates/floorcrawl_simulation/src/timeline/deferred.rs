//! Очередь отложенных действий
//!
//! Замена "delayedCall с замыканием на объект": действие хранит только Entity
//! (стабильный handle), а перед исполнением система обязана проверить, что
//! цель ещё жива и активна. Порядок исполнения: по времени, затем по порядку
//! постановки в очередь.

use bevy::prelude::*;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

/// Что сделать, когда наступит время
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredAction {
    /// Перезарядка завершена → ammo = max
    ReloadComplete { weapon: Entity },
    /// Истёк lifespan снаряда
    ProjectileExpired { projectile: Entity },
    /// Вторичная детонация ящика (цепная реакция)
    ChainDetonation { prop: Entity },
    /// Снять HitFlash с актора
    HitFlashEnd { actor: Entity },
}

/// Стабильный handle запланированного действия (для отмены)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeferredHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    fire_at_ms: u64,
    handle: DeferredHandle,
    action: DeferredAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.handle == other.handle
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.fire_at_ms, self.handle).cmp(&(other.fire_at_ms, other.handle))
    }
}

/// Min-heap отложенных действий (resource)
#[derive(Resource, Debug, Default)]
pub struct DeferredQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    cancelled: HashSet<DeferredHandle>,
    next_handle: u64,
}

impl DeferredQueue {
    pub fn schedule(&mut self, fire_at_ms: u64, action: DeferredAction) -> DeferredHandle {
        let handle = DeferredHandle(self.next_handle);
        self.next_handle += 1;
        self.heap.push(Reverse(Scheduled {
            fire_at_ms,
            handle,
            action,
        }));
        handle
    }

    /// Отмена: действие молча выбрасывается при извлечении
    pub fn cancel(&mut self, handle: DeferredHandle) {
        self.cancelled.insert(handle);
    }

    /// Следующее действие, чьё время наступило (fire_at ≤ now)
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DeferredAction> {
        loop {
            let next = self.heap.peek()?;
            if next.0.fire_at_ms > now_ms {
                return None;
            }

            let Reverse(scheduled) = self.heap.pop()?;
            if self.cancelled.remove(&scheduled.handle) {
                continue;
            }
            return Some(scheduled.action);
        }
    }

    /// Количество ожидающих действий (включая отменённые, ещё не извлечённые)
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.cancelled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_respects_time() {
        let mut queue = DeferredQueue::default();
        let prop = Entity::from_raw(7);
        queue.schedule(200, DeferredAction::ChainDetonation { prop });

        assert_eq!(queue.pop_due(199), None);
        assert_eq!(queue.pop_due(200), Some(DeferredAction::ChainDetonation { prop }));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_time_actions_fire_in_schedule_order() {
        let mut queue = DeferredQueue::default();
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        queue.schedule(100, DeferredAction::ReloadComplete { weapon: b });
        queue.schedule(100, DeferredAction::ReloadComplete { weapon: a });
        queue.schedule(50, DeferredAction::HitFlashEnd { actor: a });

        assert_eq!(queue.pop_due(100), Some(DeferredAction::HitFlashEnd { actor: a }));
        assert_eq!(queue.pop_due(100), Some(DeferredAction::ReloadComplete { weapon: b }));
        assert_eq!(queue.pop_due(100), Some(DeferredAction::ReloadComplete { weapon: a }));
        assert_eq!(queue.pop_due(100), None);
    }

    #[test]
    fn test_cancelled_action_is_skipped() {
        let mut queue = DeferredQueue::default();
        let projectile = Entity::from_raw(3);
        let handle = queue.schedule(1000, DeferredAction::ProjectileExpired { projectile });
        queue.schedule(1000, DeferredAction::HitFlashEnd { actor: projectile });

        queue.cancel(handle);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_due(5000), Some(DeferredAction::HitFlashEnd { actor: projectile }));
        assert_eq!(queue.pop_due(5000), None);
    }
}
