use std::collections::VecDeque;

use crate::state::SessionEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled {
    pub due_ns: u64,
    pub event: SessionEvent,
}

/// Delayed events waiting for the runner's clock, kept in due order
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<Scheduled>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events with equal deadlines keep their scheduling order.
    pub fn schedule(&mut self, due_ns: u64, event: SessionEvent) {
        let at = self.pending.partition_point(|s| s.due_ns <= due_ns);
        self.pending.insert(at, Scheduled { due_ns, event });
    }

    pub fn pop_due(&mut self, now_ns: u64) -> Vec<SessionEvent> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|s| s.due_ns <= now_ns) {
            if let Some(s) = self.pending.pop_front() {
                due.push(s.event);
            }
        }
        due
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.front().map(|s| s.due_ns)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
