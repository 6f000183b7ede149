//! Virtual-clock timer queue ("run once after delay").
//!
//! Entries are kept ordered by due time; entries due at the same instant
//! fire in the order they were scheduled. Time only moves when the owner
//! advances it, so tests never wait on a wall clock.

use std::collections::VecDeque;

/// Handle to a scheduled entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    due: f64,
    payload: T,
}

/// Ordered queue of delayed payloads on a millisecond clock.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: f64,
    next_id: u64,
    pending: VecDeque<Entry<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            pending: VecDeque::with_capacity(64),
        }
    }

    /// Current clock value in milliseconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Schedule `payload` to become due `delay_ms` after the current time.
    pub fn schedule(&mut self, delay_ms: f64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay_ms.max(0.0);
        // Insert after every entry due at or before `due`, keeping ties FIFO.
        let idx = self.pending.partition_point(|e| e.due <= due);
        self.pending.insert(idx, Entry { id, due, payload });
        id
    }

    /// Pop the earliest entry due at or before `until`, moving the clock to its due time.
    pub fn pop_due(&mut self, until: f64) -> Option<(f64, TimerId, T)> {
        if self.pending.front().is_some_and(|e| e.due <= until) {
            let entry = self.pending.pop_front()?;
            self.now = self.now.max(entry.due);
            Some((entry.due, entry.id, entry.payload))
        } else {
            None
        }
    }

    /// Move the clock forward to `until` once every due entry has been popped.
    pub fn settle(&mut self, until: f64) {
        self.now = self.now.max(until);
    }

    /// Due time of the next pending entry.
    pub fn next_due(&self) -> Option<f64> {
        self.pending.front().map(|e| e.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
