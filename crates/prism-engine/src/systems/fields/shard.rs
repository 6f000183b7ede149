//! Glass shards: spinning polygons flung out from a burst center, fading out.

use std::f32::consts::TAU;

use glam::Vec2;

use super::rng::RandomSource;
use crate::api::config::ShardConfig;
use crate::renderer::surface::{GradientStop, RadialGradient, Rgba, StrokeStyle, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct GlassShard {
    pub pos: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Rotation in radians.
    pub angle: f32,
    /// Radians per tick.
    pub spin: f32,
    /// 1.0 at spawn, decays to exactly 0.0 and stays there.
    pub opacity: f32,
    /// Pulsing glow, 0.0 - 1.0.
    pub glow: f32,
    /// Polygon corners relative to `pos`, before rotation.
    pub vertices: Vec<Vec2>,
}

impl GlassShard {
    pub fn new(pos: Vec2, size: f32, config: &ShardConfig, rng: &mut dyn RandomSource) -> Self {
        let angle = rng.next_f32() * TAU;
        let spin = rng.centered(config.spin);
        let velocity = Vec2::new(rng.centered(config.speed), rng.centered(config.speed));
        let glow = rng.next_f32();
        let vertices = shard_polygon(size, rng);
        Self {
            pos,
            velocity,
            size,
            angle,
            spin,
            opacity: 1.0,
            glow,
            vertices,
        }
    }

    pub fn tick(&mut self, config: &ShardConfig, time_ms: f64) {
        self.pos += self.velocity;
        self.angle += self.spin;
        self.opacity = (self.opacity - config.fade_per_tick).max(0.0);
        // Phase offset by x so neighbouring shards pulse out of step.
        self.glow = ((time_ms * 0.005 + self.pos.x as f64).sin() * 0.5 + 0.5) as f32;
    }

    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }

    /// Polygon corners in surface space.
    pub fn world_vertices(&self) -> Vec<Vec2> {
        let rotation = Vec2::from_angle(self.angle);
        self.vertices.iter().map(|v| self.pos + rotation.rotate(*v)).collect()
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.is_spent() {
            return;
        }
        let outline = self.world_vertices();
        let alpha = self.opacity;

        let gradient = RadialGradient {
            center: self.pos,
            radius: self.size,
            stops: vec![
                GradientStop { offset: 0.0, color: Rgba::rgb8(255.0, 255.0, 255.0, 0.9 * alpha) },
                GradientStop { offset: 0.5, color: Rgba::rgb8(240.0, 240.0, 255.0, 0.8 * alpha) },
                GradientStop { offset: 1.0, color: Rgba::rgb8(220.0, 220.0, 240.0, 0.7 * alpha) },
            ],
        };
        surface.fill_gradient(&outline, &gradient);

        let edge = StrokeStyle::new(Rgba::rgb8(139.0, 92.0, 246.0, 0.6 * alpha), 2.0)
            .with_glow(30.0 + self.glow * 20.0, Rgba::rgb8(139.0, 92.0, 246.0, self.glow * alpha));
        surface.stroke_path(&outline, true, &edge);

        let halo = StrokeStyle::new(Rgba::rgb8(139.0, 92.0, 246.0, 0.3 * alpha * self.glow), 6.0);
        surface.stroke_path(&outline, true, &halo);
    }
}

/// Irregular polygon: 5-7 corners at even angles, each at 50-100% of `size`.
fn shard_polygon(size: f32, rng: &mut dyn RandomSource) -> Vec<Vec2> {
    let count = 5 + (rng.next_f32() * 3.0).floor() as usize;
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * TAU;
            let radius = size * (0.5 + rng.next_f32() * 0.5);
            Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// A full burst around `center`: shard `i` sits at angle `i / count` of a
/// turn, at a random distance within `config.spread`.
pub fn burst(center: Vec2, config: &ShardConfig, rng: &mut dyn RandomSource) -> Vec<GlassShard> {
    (0..config.count)
        .map(|i| {
            let angle = i as f32 / config.count as f32 * TAU;
            let radius = rng.next_f32() * config.spread;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * radius;
            let size = rng.range(config.min_size, config.size_range);
            GlassShard::new(pos, size, config, rng)
        })
        .collect()
}

/// Translucent veil painted under the shards every frame. On a surface
/// cleared per frame it only tints the burst.
pub fn draw_veil<S: Surface + ?Sized>(surface: &mut S, viewport: Vec2) {
    surface.fill_rect(Vec2::ZERO, viewport, Rgba::rgb8(255.0, 255.0, 255.0, 0.02));
    surface.fill_rect(Vec2::ZERO, viewport, Rgba::rgb8(139.0, 92.0, 246.0, 0.02));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::fields::rng::{Rng, SequenceRng};

    #[test]
    fn burst_places_shards_within_spread() {
        let config = ShardConfig::default();
        let center = Vec2::new(640.0, 360.0);
        let shards = burst(center, &config, &mut Rng::new(3));
        assert_eq!(shards.len(), 80);
        for shard in &shards {
            assert!(shard.pos.distance(center) <= config.spread + 1e-3);
            assert!(shard.size >= 40.0 && shard.size < 100.0);
            assert!((5..=7).contains(&shard.vertices.len()));
            assert_eq!(shard.opacity, 1.0);
        }
    }

    #[test]
    fn polygon_radius_bounds() {
        let mut rng = SequenceRng::new(vec![0.99, 0.0, 0.99]);
        let corners = shard_polygon(60.0, &mut rng);
        assert_eq!(corners.len(), 7);
        for corner in corners {
            let r = corner.length();
            assert!((30.0 - 1e-3..=60.0 + 1e-3).contains(&r), "radius {}", r);
        }
    }

    #[test]
    fn opacity_decays_monotonically_to_zero() {
        let config = ShardConfig::default();
        let mut shard = GlassShard::new(Vec2::ZERO, 50.0, &config, &mut Rng::new(9));
        let mut last = shard.opacity;
        for tick in 0..200 {
            shard.tick(&config, tick as f64 * 16.0);
            assert!(shard.opacity <= last);
            assert!(shard.opacity >= 0.0);
            last = shard.opacity;
        }
        assert!(shard.is_spent());
    }

    #[test]
    fn shard_moves_by_velocity() {
        let config = ShardConfig::default();
        let mut shard = GlassShard::new(Vec2::new(10.0, 10.0), 50.0, &config, &mut SequenceRng::constant(0.75));
        assert_eq!(shard.velocity, Vec2::new(1.0, 1.0));
        shard.tick(&config, 0.0);
        assert_eq!(shard.pos, Vec2::new(11.0, 11.0));
    }

    #[test]
    fn glow_stays_in_unit_range() {
        let config = ShardConfig::default();
        let mut shard = GlassShard::new(Vec2::ZERO, 50.0, &config, &mut Rng::new(1));
        for tick in 0..100 {
            shard.tick(&config, tick as f64 * 16.7);
            assert!((0.0..=1.0).contains(&shard.glow));
        }
    }

    #[test]
    fn spent_shard_draws_nothing() {
        let config = ShardConfig::default();
        let mut shard = GlassShard::new(Vec2::ZERO, 50.0, &config, &mut Rng::new(1));
        let mut live = crate::renderer::CommandRecorder::new();
        shard.draw(&mut live);
        assert_eq!(live.gradient_fill_count(), 1);
        assert_eq!(live.stroke_count(), 2);

        shard.opacity = 0.0;
        let mut spent = crate::renderer::CommandRecorder::new();
        shard.draw(&mut spent);
        assert!(spent.commands.is_empty());
    }
}
