use glam::Vec2;

use super::surface::{RadialGradient, Rgba, StrokeStyle, Surface};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { origin: Vec2, size: Vec2, color: Rgba },
    Stroke { points: Vec<Vec2>, closed: bool, style: StrokeStyle },
    FillGradient { points: Vec<Vec2>, gradient: RadialGradient },
}

/// Surface that records draw calls instead of rasterizing them.
/// Handy for tests and for dumping a frame while debugging.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Vec2], &StrokeStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { points, style, .. } => Some((points.as_slice(), style)),
            _ => None,
        })
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes().count()
    }

    pub fn gradient_fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillGradient { .. }))
            .count()
    }
}

impl Surface for CommandRecorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { origin, size, color });
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            closed,
            style: *style,
        });
    }

    fn fill_gradient(&mut self, points: &[Vec2], gradient: &RadialGradient) {
        self.commands.push(DrawCommand::FillGradient {
            points: points.to_vec(),
            gradient: gradient.clone(),
        });
    }
}
