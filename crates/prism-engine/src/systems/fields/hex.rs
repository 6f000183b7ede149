//! Hexagon background cells: static grid, pointer-driven swell and glow.

use std::f32::consts::PI;

use glam::Vec2;

use crate::api::config::HexConfig;
use crate::input::pointer::PointerTracker;
use crate::renderer::surface::{Rgba, StrokeStyle, Surface};

/// Below this smoothed glow a cell is drawn in its idle style.
const GLOW_FLOOR: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub center: Vec2,
    pub size: f32,
    /// Smoothed scale, chasing `target_scale`.
    pub scale: f32,
    pub target_scale: f32,
    /// Smoothed hover intensity, 0.0 - 1.0.
    pub glow: f32,
    /// Stroke strength from the focus-anchor distance, 0.0 - 1.0.
    pub fade: f32,
}

impl HexCell {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            center,
            size,
            scale: 1.0,
            target_scale: 1.0,
            glow: 0.0,
            fade: 1.0,
        }
    }

    pub fn tick(&mut self, config: &HexConfig, pointer: &PointerTracker) {
        let intensity = hover_intensity(pointer.distance_to_pointer(self.center), config.hover_radius);
        self.target_scale = 1.0 + intensity * config.hover_scale;
        self.scale += (self.target_scale - self.scale) * config.smoothing;
        self.glow += (intensity - self.glow) * config.smoothing;
        self.fade = anchor_fade(
            pointer.distance_to_anchor(self.center),
            config.anchor_inner,
            config.anchor_fade,
        );
    }

    /// The six corners, scaled about the center.
    pub fn outline(&self) -> [Vec2; 6] {
        let radius = self.size * self.scale;
        std::array::from_fn(|i| {
            let angle = PI / 3.0 * i as f32;
            self.center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        if self.glow > GLOW_FLOOR {
            let i = self.glow;
            let color = Rgba::rgb8(
                (139.0 + i * 50.0).floor(),
                (92.0 + i * 50.0).floor(),
                246.0,
                (0.15 + i * 0.15) * self.fade,
            );
            StrokeStyle::new(color, 1.0 + i * 0.5)
                .with_glow(i * 5.0, Rgba::rgb8(139.0, 92.0, 246.0, i * 0.3 * self.fade))
        } else {
            StrokeStyle::new(Rgba::rgb8(200.0, 200.0, 200.0, 0.3 * self.fade), 1.0)
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.fade <= 0.0 {
            return;
        }
        surface.stroke_path(&self.outline(), true, &self.stroke_style());
    }
}

/// Pointer influence: 1 at the cell, linearly 0 at `radius` and beyond.
pub fn hover_intensity(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).max(0.0)
}

/// Anchor fade: full inside `inner`, linear to zero over the next `span`.
pub fn anchor_fade(distance: f32, inner: f32, span: f32) -> f32 {
    if distance <= inner {
        1.0
    } else if span <= 0.0 {
        0.0
    } else {
        (1.0 - (distance - inner) / span).clamp(0.0, 1.0)
    }
}

/// Tessellate the viewport (plus one cell of margin per edge) with cells.
/// Odd rows shift right by half the horizontal spacing.
pub fn layout(viewport: Vec2, size: f32) -> Vec<HexCell> {
    if size <= 0.0 {
        return Vec::new();
    }
    let spacing = size * 3f32.sqrt();
    let row_pitch = spacing * 0.75;
    let mut cells = Vec::new();

    let mut y = -size;
    while y < viewport.y + size {
        // Signed remainder: the row above the viewport shifts left.
        let row = (y / row_pitch).floor() as i64;
        let offset = (row % 2) as f32 * (spacing / 2.0);
        let mut x = -size;
        while x < viewport.x + size {
            cells.push(HexCell::new(Vec2::new(x + offset, y), size));
            x += spacing;
        }
        y += row_pitch;
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_covers_viewport_with_margin() {
        let cells = layout(Vec2::new(400.0, 300.0), 30.0);
        assert!(!cells.is_empty());
        let min_x = cells.iter().map(|c| c.center.x).fold(f32::MAX, f32::min);
        let max_x = cells.iter().map(|c| c.center.x).fold(f32::MIN, f32::max);
        let min_y = cells.iter().map(|c| c.center.y).fold(f32::MAX, f32::min);
        let max_y = cells.iter().map(|c| c.center.y).fold(f32::MIN, f32::max);
        assert!(min_x <= 0.0 && min_y <= 0.0);
        assert!(max_x + 30.0 >= 400.0);
        assert!(max_y + 30.0 >= 300.0);
    }

    #[test]
    fn alternate_rows_are_offset() {
        let size = 30.0;
        let spacing = size * 3f32.sqrt();
        let cells = layout(Vec2::new(200.0, 200.0), size);
        let mut rows: Vec<f32> = cells.iter().map(|c| c.center.y).collect();
        rows.dedup();
        let first_x = |y: f32| cells.iter().find(|c| c.center.y == y).unwrap().center.x;
        let shift = (first_x(rows[1]) - first_x(rows[2])).abs();
        assert!((shift - spacing / 2.0).abs() < 1e-3, "shift was {}", shift);
    }

    #[test]
    fn degenerate_size_yields_no_cells() {
        assert!(layout(Vec2::new(100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn hover_intensity_clips_at_radius() {
        assert_eq!(hover_intensity(0.0, 150.0), 1.0);
        assert_eq!(hover_intensity(75.0, 150.0), 0.5);
        assert_eq!(hover_intensity(150.0, 150.0), 0.0);
        assert_eq!(hover_intensity(400.0, 150.0), 0.0);
    }

    #[test]
    fn anchor_fade_bands() {
        assert_eq!(anchor_fade(50.0, 100.0, 250.0), 1.0);
        assert_eq!(anchor_fade(100.0, 100.0, 250.0), 1.0);
        assert!((anchor_fade(225.0, 100.0, 250.0) - 0.5).abs() < 1e-6);
        assert_eq!(anchor_fade(350.0, 100.0, 250.0), 0.0);
        assert_eq!(anchor_fade(900.0, 100.0, 250.0), 0.0);
    }

    #[test]
    fn scale_converges_without_overshoot() {
        let config = HexConfig::default();
        let mut pointer = PointerTracker::default();
        pointer.on_pointer_move(10.0, 0.0);
        let mut cell = HexCell::new(Vec2::ZERO, 30.0);

        let mut gap = f32::MAX;
        for _ in 0..50 {
            cell.tick(&config, &pointer);
            let next_gap = (cell.scale - cell.target_scale).abs();
            assert!(next_gap < gap, "gap grew: {} -> {}", gap, next_gap);
            assert!(cell.scale <= cell.target_scale);
            gap = next_gap;
        }
    }

    #[test]
    fn idle_cell_uses_grey_stroke() {
        let cell = HexCell::new(Vec2::ZERO, 30.0);
        let style = cell.stroke_style();
        assert!(style.glow.is_none());
        assert_eq!(style.width, 1.0);
        assert!((style.color.a - 0.3).abs() < 1e-6);
    }

    #[test]
    fn hovered_cell_glows() {
        let mut cell = HexCell::new(Vec2::ZERO, 30.0);
        cell.glow = 1.0;
        let style = cell.stroke_style();
        assert_eq!(style.width, 1.5);
        assert!((style.color.r - 189.0 / 255.0).abs() < 1e-6);
        assert_eq!(style.glow.map(|g| g.blur), Some(5.0));
    }
}
