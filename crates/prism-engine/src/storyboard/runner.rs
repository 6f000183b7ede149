// storyboard/runner.rs
//
// Schedules storyboards on one virtual-clock timer queue and hands fired
// actions back to the owner in time order.
//
// Usage:
//   let mut runner = StoryboardRunner::new();
//   runner.run(&timelines::open_detail(..), Some(Guard::Page));
//   for fired in runner.advance(dt_ms) { site.apply(fired.action); }

use std::collections::HashMap;

use super::step::{Action, Storyboard};
use crate::core::timer::TimerQueue;

/// Re-entry guard families. A guarded storyboard is rejected while an
/// earlier run of the same family still has pending steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Page transitions: open detail, return home.
    Page,
    /// Case menu and case loading.
    Case,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u32);

#[derive(Debug, Clone)]
struct RunState {
    name: &'static str,
    guard: Option<Guard>,
    /// Steps scheduled but not yet fired, including nested ones.
    remaining: usize,
}

/// An action whose time has come.
#[derive(Debug, Clone, PartialEq)]
pub struct Fired {
    pub at_ms: f64,
    pub run: RunId,
    pub action: Action,
}

#[derive(Debug, Clone, Default)]
pub struct StoryboardRunner {
    queue: TimerQueue<(RunId, Action)>,
    runs: HashMap<RunId, RunState>,
    held: HashMap<Guard, RunId>,
    next_run: u32,
}

impl StoryboardRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule every step of `board` relative to now. Returns `None` when
    /// `guard` is already held.
    pub fn run(&mut self, board: &Storyboard, guard: Option<Guard>) -> Option<RunId> {
        if let Some(g) = guard {
            if let Some(owner) = self.held.get(&g) {
                log::debug!("storyboard '{}' rejected: {:?} guard held by run {}", board.name(), g, owner.0);
                return None;
            }
        }
        let id = RunId(self.next_run);
        self.next_run += 1;
        if board.is_empty() {
            return Some(id);
        }

        self.schedule_steps(id, board);
        self.runs.insert(
            id,
            RunState {
                name: board.name(),
                guard,
                remaining: board.len(),
            },
        );
        if let Some(g) = guard {
            self.held.insert(g, id);
        }
        log::debug!("storyboard '{}' started as run {} ({} steps)", board.name(), id.0, board.len());
        Some(id)
    }

    fn schedule_steps(&mut self, id: RunId, board: &Storyboard) {
        for step in board.steps() {
            self.queue.schedule(step.offset_ms as f64, (id, step.action.clone()));
        }
    }

    /// Move the clock forward and return every action that came due, in
    /// firing order. Nested storyboards are expanded in place.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<Fired> {
        let until = self.queue.now() + dt_ms.max(0.0);
        let mut fired = Vec::new();
        while let Some((at_ms, _, (run, action))) = self.queue.pop_due(until) {
            match action {
                Action::Run(child) => {
                    self.schedule_steps(run, &child);
                    if let Some(state) = self.runs.get_mut(&run) {
                        state.remaining += child.len();
                    }
                }
                action => fired.push(Fired { at_ms, run, action }),
            }
            self.finish_step(run);
        }
        self.queue.settle(until);
        fired
    }

    fn finish_step(&mut self, run: RunId) {
        let Some(state) = self.runs.get_mut(&run) else {
            return;
        };
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining > 0 {
            return;
        }
        if let Some(state) = self.runs.remove(&run) {
            if let Some(g) = state.guard {
                self.held.remove(&g);
            }
            log::debug!("storyboard '{}' (run {}) finished", state.name, run.0);
        }
    }

    pub fn is_guarded(&self, guard: Guard) -> bool {
        self.held.contains_key(&guard)
    }

    pub fn now(&self) -> f64 {
        self.queue.now()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
