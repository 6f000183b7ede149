//! Pointer position and focus-anchor tracking.
//!
//! Fields only read from the tracker; the site is the sole writer.

use glam::Vec2;

use crate::core::time::FixedTimestep;

/// Axis-aligned rectangle in client pixels (a bounding client rect).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Measures the anchor element. Implemented by the DOM layer.
pub trait LayoutProbe {
    /// Current bounding rect of the anchor element, if it exists.
    fn anchor_rect(&self) -> Option<Rect>;
}

/// Probe that always reports the same rect.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Rect);

impl LayoutProbe for FixedProbe {
    fn anchor_rect(&self) -> Option<Rect> {
        Some(self.0)
    }
}

/// Latest pointer coordinates plus the focus anchor used for radius fades.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    pointer: Vec2,
    anchor: Vec2,
    poll: FixedTimestep,
}

impl PointerTracker {
    pub fn new(poll_ms: f64) -> Self {
        Self {
            pointer: Vec2::ZERO,
            anchor: Vec2::ZERO,
            poll: FixedTimestep::new(poll_ms).with_max_steps(1),
        }
    }

    /// Record the pointer position. No smoothing.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Set the focus anchor to the rect's center.
    pub fn recompute_focus_anchor(&mut self, rect: Rect) {
        self.anchor = rect.center();
    }

    /// Advance the poll clock. Returns true when the anchor should be re-measured.
    pub fn poll(&mut self, dt_ms: f64) -> bool {
        self.poll.accumulate(dt_ms) > 0
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn focus_anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn distance_to_pointer(&self, point: Vec2) -> f32 {
        self.pointer.distance(point)
    }

    pub fn distance_to_anchor(&self, point: Vec2) -> f32 {
        self.anchor.distance(point)
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(100.0)
    }
}
