//! 2D drawing surface contract consumed by the particle fields.
//!
//! Mirrors the handful of canvas primitives the effects need: clear,
//! fill-rect, stroked paths (with optional glow) and radial-gradient fills.
//! Transforms are applied by the caller, so every point is in surface space.

use glam::Vec2;

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Canvas-style `rgba(r, g, b, a)` with 0-255 channels.
    pub fn rgb8(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r / 255.0,
            g: g / 255.0,
            b: b / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    pub fn scale_alpha(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    pub fn lerp(self, other: Rgba, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Soft halo drawn under a stroke (canvas `shadowBlur`/`shadowColor`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f32,
    pub glow: Option<Glow>,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self { color, width, glow: None }
    }

    pub fn with_glow(mut self, blur: f32, color: Rgba) -> Self {
        if blur > 0.0 {
            self.glow = Some(Glow { blur, color });
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, 0.0 - 1.0.
    pub offset: f32,
    pub color: Rgba,
}

/// Radial gradient centered at `center`, reaching its last stop at `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    /// Stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Color at a surface point, clamped to the first/last stop.
    pub fn color_at(&self, point: Vec2) -> Rgba {
        let t = if self.radius > 0.0 {
            (point.distance(self.center) / self.radius).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let Some(first) = self.stops.first() else {
            return Rgba::default();
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = (b.offset - a.offset).max(f32::EPSILON);
                return a.color.lerp(b.color, (t - a.offset) / span);
            }
        }
        self.stops.last().map_or(first.color, |s| s.color)
    }
}

/// A 2D drawing target sized to the viewport.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);

    /// Stroke a polyline, closing it back to the first point when `closed`.
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, style: &StrokeStyle);

    /// Fill a closed polygon with a radial gradient.
    fn fill_gradient(&mut self, points: &[Vec2], gradient: &RadialGradient);
}
