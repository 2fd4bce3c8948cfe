//! Deferred tasks on the controller's timeline.
//!
//! Timers are plain data: scheduling returns a [`TimerId`] the owner can
//! cancel at any point before the task is popped. Due tasks come out in
//! `(due, scheduling order)` order, so two timers due at the same instant fire
//! in the order they were scheduled.

use fnv::FnvHashMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::session::SessionHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerTask {
    AutoHide(SessionHandle),
    Tick(SessionHandle),
    Relayout(SessionHandle),
}

impl TimerTask {
    pub fn session(&self) -> SessionHandle {
        match *self {
            TimerTask::AutoHide(h) | TimerTask::Tick(h) | TimerTask::Relayout(h) => h,
        }
    }
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    // Ids are allocated in scheduling order, so (due, id) is the firing order.
    heap: BinaryHeap<Reverse<(u64, TimerId)>>,
    pending: FnvHashMap<TimerId, TimerTask>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.heap.push(Reverse((due_ms, id)));
        self.pending.insert(id, task);
        log::trace!("[timer] scheduled {:?} at {}ms as {:?}", task, due_ms, id);
        id
    }

    /// Returns false if the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Pop the earliest live timer due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerId, u64, TimerTask)> {
        while let Some(&Reverse((due, id))) = self.heap.peek() {
            if due > now_ms {
                return None;
            }
            self.heap.pop();
            if let Some(task) = self.pending.remove(&id) {
                return Some((id, due, task));
            }
        }
        None
    }

    /// Due time of the earliest live timer. Cancelled entries are skipped,
    /// not removed; `pop_due` clears them.
    pub fn next_due(&self) -> Option<u64> {
        self.heap
            .iter()
            .filter(|Reverse((_, id))| self.pending.contains_key(id))
            .map(|Reverse((due, _))| *due)
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
