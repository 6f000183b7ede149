//! Light-streak rain: drops fall at a fixed per-drop speed and recycle above the viewport.

use glam::Vec2;

use super::rng::RandomSource;
use crate::api::config::RainConfig;
use crate::renderer::surface::{Rgba, StrokeStyle, Surface};

const STREAK_WIDTH: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    /// Head of the streak (top end).
    pub pos: Vec2,
    pub length: f32,
    /// Pixels per tick.
    pub speed: f32,
    pub opacity: f32,
    /// Smoothed brightness: rises while the field runs, sinks while frozen.
    pub glow: f32,
}

impl RainDrop {
    /// A drop somewhere above the viewport, so the first frames fill in gradually.
    pub fn new(viewport: Vec2, config: &RainConfig, rng: &mut dyn RandomSource) -> Self {
        let length = rng.range(config.min_length, config.length_range).max(1.0);
        let x = rng.next_f32() * viewport.x;
        let y = -(rng.next_f32() * viewport.y) - length;
        Self {
            pos: Vec2::new(x, y),
            length,
            speed: rng.range(config.min_speed, config.speed_range),
            opacity: rng.range(config.min_opacity, config.opacity_range),
            glow: 0.0,
        }
    }

    /// Advance one tick. Positions only move while `active`.
    pub fn tick(&mut self, active: bool, viewport: Vec2, config: &RainConfig, rng: &mut dyn RandomSource) {
        let target = if active { 1.0 } else { 0.0 };
        self.glow += (target - self.glow) * config.glow_smoothing;
        if !active {
            return;
        }
        self.pos.y += self.speed;
        if self.pos.y > viewport.y {
            self.respawn(viewport, config, rng);
        }
    }

    /// Wrap to a fresh column strictly above the viewport.
    fn respawn(&mut self, viewport: Vec2, config: &RainConfig, rng: &mut dyn RandomSource) {
        self.pos.x = rng.next_f32() * viewport.x;
        self.pos.y = -self.length - rng.next_f32() * config.respawn_jitter;
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let alpha = self.opacity * self.glow;
        if alpha <= 0.0 {
            return;
        }
        let tail = self.pos + Vec2::new(0.0, self.length);
        let style = StrokeStyle::new(Rgba::rgb8(0.0, 212.0, 255.0, alpha), STREAK_WIDTH);
        surface.stroke_path(&[self.pos, tail], false, &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::fields::rng::{Rng, SequenceRng};

    const VIEW: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn spawns_above_viewport() {
        let config = RainConfig::default();
        let mut rng = Rng::new(5);
        for _ in 0..200 {
            let drop = RainDrop::new(VIEW, &config, &mut rng);
            assert!(drop.pos.y < 0.0);
            assert!((0.0..VIEW.x).contains(&drop.pos.x));
            assert!(drop.speed >= 4.0 && drop.speed < 10.0);
        }
    }

    #[test]
    fn falls_only_while_active() {
        let config = RainConfig::default();
        let mut rng = SequenceRng::constant(0.5);
        let mut drop = RainDrop::new(VIEW, &config, &mut rng);
        let start = drop.pos.y;

        drop.tick(false, VIEW, &config, &mut rng);
        assert_eq!(drop.pos.y, start);

        drop.tick(true, VIEW, &config, &mut rng);
        assert_eq!(drop.pos.y, start + drop.speed);
    }

    #[test]
    fn wraps_to_top_past_bottom_edge() {
        let config = RainConfig::default();
        let mut rng = Rng::new(11);
        let mut drop = RainDrop::new(VIEW, &config, &mut rng);
        drop.pos.y = VIEW.y - 1.0;
        drop.speed = 5.0;

        drop.tick(true, VIEW, &config, &mut rng);

        assert!(drop.pos.y < 0.0);
        assert!((0.0..VIEW.x).contains(&drop.pos.x));
    }

    #[test]
    fn glow_fades_when_frozen() {
        let config = RainConfig::default();
        let mut rng = Rng::new(2);
        let mut drop = RainDrop::new(VIEW, &config, &mut rng);
        for _ in 0..30 {
            drop.tick(true, VIEW, &config, &mut rng);
        }
        let lit = drop.glow;
        drop.tick(false, VIEW, &config, &mut rng);
        assert!(drop.glow < lit);
    }

    #[test]
    fn dark_drop_is_not_drawn() {
        let config = RainConfig::default();
        let drop = RainDrop::new(VIEW, &config, &mut Rng::new(4));
        let mut recorder = crate::renderer::CommandRecorder::new();
        drop.draw(&mut recorder);
        assert!(recorder.commands.is_empty());
    }
}
