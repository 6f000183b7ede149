// storyboard/step.rs
//
// Declarative timed step lists. A storyboard is data: building one has no
// effect until a runner schedules it.
//
// Usage:
//   let board = Storyboard::new("reveal")
//       .at(0, Action::SetClass { view: View::Loader, class: Class::FadeOut, on: true })
//       .at(500, Action::SetClass { view: View::Loader, class: Class::Hidden, on: true });
//   runner.run(&board, None);

use crate::api::types::{Class, View};
use crate::systems::fields::FieldKind;

/// What a step does when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set or clear one class on one view.
    SetClass { view: View, class: Class, on: bool },
    StartField(FieldKind),
    StopField(FieldKind),
    /// Fire a fresh glass burst.
    BurstShards,
    /// Show glyph `index` of the loading label.
    RevealGlyph { index: usize },
    /// Recolor glyph `index`.
    GlyphColor { index: usize, color: String },
    SetCurrentView(View),
    StartAutoRotate,
    StopAutoRotate,
    /// No effect. Keeps the run, and its guard, open until its offset.
    Wait,
    /// Schedule a nested storyboard; its steps join the current run.
    Run(Box<Storyboard>),
}

impl Action {
    pub fn show(view: View) -> Self {
        Self::SetClass { view, class: Class::Visible, on: true }
    }

    pub fn add(view: View, class: Class) -> Self {
        Self::SetClass { view, class, on: true }
    }

    pub fn remove(view: View, class: Class) -> Self {
        Self::SetClass { view, class, on: false }
    }
}

/// One action at an offset (ms) from its storyboard's start.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub offset_ms: u32,
    pub action: Action,
}

/// An ordered step list with non-decreasing offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storyboard {
    name: &'static str,
    steps: Vec<Step>,
}

impl Storyboard {
    pub fn new(name: &'static str) -> Self {
        Self { name, steps: Vec::new() }
    }

    /// Builder form of `push`.
    pub fn at(mut self, offset_ms: u32, action: Action) -> Self {
        self.push(offset_ms, action);
        self
    }

    /// Insert after every step at or before `offset_ms`, so steps sharing an
    /// offset keep the order they were added in.
    pub fn push(&mut self, offset_ms: u32, action: Action) {
        let idx = self.steps.partition_point(|s| s.offset_ms <= offset_ms);
        self.steps.insert(idx, Step { offset_ms, action });
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Offset of the last step.
    pub fn duration_ms(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.offset_ms)
    }
}
