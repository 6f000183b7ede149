/// Input events the site understands.
/// Coordinates are client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began. `on_face` is true when the press landed on a
    /// clickable polyhedron face (those clicks navigate instead of dragging).
    PointerDown { x: f32, y: f32, on_face: bool },
    /// A touch/click ended.
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved.
    PointerMove { x: f32, y: f32 },
    /// The viewport was resized.
    Resize { width: f32, height: f32 },
    /// The page scrolled; layout-dependent anchors must be re-measured.
    Scroll,
}

/// Pending input for the next frame.
///
/// Back-to-back resizes collapse into the latest one and repeated scrolls
/// into one, since each only triggers a re-measure. Pointer events are
/// kept individually because drag deltas depend on every position.
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        match (self.events.last_mut(), event) {
            (Some(last @ InputEvent::Resize { .. }), InputEvent::Resize { .. }) => *last = event,
            (Some(InputEvent::Scroll), InputEvent::Scroll) => {}
            _ => self.events.push(event),
        }
    }

    /// Take every pending event in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0, on_face: false });
        q.push(InputEvent::Scroll);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_arrival_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        q.push(InputEvent::PointerUp { x: 2.0, y: 2.0 });
        let events = q.drain();
        assert_eq!(events[1], InputEvent::Resize { width: 800.0, height: 600.0 });
        assert!(matches!(events[2], InputEvent::PointerUp { .. }));
    }

    #[test]
    fn resize_bursts_collapse_to_latest() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 100.0, height: 100.0 });
        q.push(InputEvent::Resize { width: 200.0, height: 150.0 });
        q.push(InputEvent::Scroll);
        q.push(InputEvent::Scroll);
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        let events = q.drain();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], InputEvent::Resize { width: 200.0, height: 150.0 });
    }
}
