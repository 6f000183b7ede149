//! Particle fields: one independently managed group of particles of a single kind.
//!
//! The three effects (hex grid, glass burst, rain) share this engine. A
//! field's configuration picks the kind; `Particle` dispatches per kind.

pub mod hex;
pub mod rain;
pub mod rng;
pub mod shard;

use glam::Vec2;

use crate::api::config::{HexConfig, RainConfig, ShardConfig};
use crate::input::pointer::PointerTracker;
use crate::renderer::surface::Surface;

pub use hex::HexCell;
pub use rain::RainDrop;
pub use rng::{RandomSource, Rng, SequenceRng};
pub use shard::GlassShard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Hex,
    Shards,
    Rain,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [Self::Hex, Self::Shards, Self::Rain];
}

/// Kind plus the constants that drive it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConfig {
    Hex(HexConfig),
    Shards(ShardConfig),
    Rain(RainConfig),
}

impl FieldConfig {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Hex(_) => FieldKind::Hex,
            Self::Shards(_) => FieldKind::Shards,
            Self::Rain(_) => FieldKind::Rain,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Particle {
    Hex(HexCell),
    Shard(GlassShard),
    Rain(RainDrop),
}

/// Shared, read-only per-tick inputs.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub pointer: &'a PointerTracker,
    /// Clock in milliseconds (drives the shard glow pulse).
    pub time_ms: f64,
}

/// One effect's particle set and running flag.
#[derive(Debug, Clone)]
pub struct ParticleField<R: RandomSource = Rng> {
    config: FieldConfig,
    particles: Vec<Particle>,
    active: bool,
    viewport: Vec2,
    rng: R,
    /// Completed shard bursts, for lifecycle bookkeeping.
    bursts_finished: u32,
}

impl<R: RandomSource> ParticleField<R> {
    /// An empty, inactive field.
    pub fn new(config: FieldConfig, viewport: Vec2, rng: R) -> Self {
        Self {
            config,
            particles: Vec::new(),
            active: false,
            viewport,
            rng,
            bursts_finished: 0,
        }
    }

    /// A populated, active field laid out per its kind.
    pub fn initialize(config: FieldConfig, viewport: Vec2, rng: R) -> Self {
        let mut field = Self::new(config, viewport, rng);
        field.populate();
        field.active = true;
        field
    }

    /// Rebuild the particle set from scratch.
    pub fn populate(&mut self) {
        let viewport = self.viewport;
        let rng: &mut dyn RandomSource = &mut self.rng;
        self.particles = match &self.config {
            FieldConfig::Hex(c) => hex::layout(viewport, c.size).into_iter().map(Particle::Hex).collect(),
            FieldConfig::Shards(c) => shard::burst(viewport / 2.0, c, rng)
                .into_iter()
                .map(Particle::Shard)
                .collect(),
            FieldConfig::Rain(c) => (0..c.count)
                .map(|_| Particle::Rain(RainDrop::new(viewport, c, rng)))
                .collect(),
        };
    }

    /// Begin animating. Shards fire a fresh burst; rain resumes where it froze.
    pub fn start(&mut self) {
        match self.kind() {
            FieldKind::Shards => self.burst(),
            FieldKind::Hex | FieldKind::Rain => {
                if self.particles.is_empty() {
                    self.populate();
                }
                self.active = true;
            }
        }
    }

    /// Freeze the field. A stopped shard burst is discarded.
    pub fn stop(&mut self) {
        self.active = false;
        if self.kind() == FieldKind::Shards {
            self.particles.clear();
        }
    }

    /// Replace any in-flight burst with a new one around the viewport center.
    pub fn burst(&mut self) {
        self.populate();
        self.active = !self.particles.is_empty();
        log::debug!("{:?} field: burst of {}", self.kind(), self.particles.len());
    }

    /// Viewport changed. Hex rebuilds outright, rain respawns into the new
    /// width over time, an in-flight burst keeps its coordinates.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
        if self.kind() == FieldKind::Hex {
            self.populate();
        }
    }

    /// Advance every particle one tick, then apply the kind's lifecycle rule.
    pub fn tick(&mut self, ctx: &TickContext<'_>) {
        let viewport = self.viewport;
        let active = self.active;
        match &self.config {
            FieldConfig::Hex(c) => {
                if !active {
                    return;
                }
                for p in &mut self.particles {
                    if let Particle::Hex(cell) = p {
                        cell.tick(c, ctx.pointer);
                    }
                }
            }
            FieldConfig::Shards(c) => {
                if !active {
                    return;
                }
                let mut all_spent = true;
                for p in &mut self.particles {
                    if let Particle::Shard(shard) = p {
                        shard.tick(c, ctx.time_ms);
                        all_spent &= shard.is_spent();
                    }
                }
                if all_spent {
                    self.particles.clear();
                    self.active = false;
                    self.bursts_finished += 1;
                    log::debug!("shard burst finished");
                }
            }
            FieldConfig::Rain(c) => {
                let rng: &mut dyn RandomSource = &mut self.rng;
                for p in &mut self.particles {
                    if let Particle::Rain(drop) = p {
                        drop.tick(active, viewport, c, rng);
                    }
                }
            }
        }
    }

    /// Draw every particle in insertion order.
    ///
    /// The surface starts from a clear every frame, so the shard veil is a
    /// faint tint under the burst. Frames do not accumulate into trails.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        if self.kind() == FieldKind::Shards {
            if !self.active {
                return;
            }
            shard::draw_veil(surface, self.viewport);
        }
        for p in &self.particles {
            match p {
                Particle::Hex(cell) => cell.draw(surface),
                Particle::Shard(shard) => shard.draw(surface),
                Particle::Rain(drop) => drop.draw(surface),
            }
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.config.kind()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn bursts_finished(&self) -> u32 {
        self.bursts_finished
    }
}
