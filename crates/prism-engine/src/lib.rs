pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod storyboard;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    HexConfig, IntroConfig, NavConfig, RainConfig, RotationConfig, ShardConfig, SiteConfig, Variant,
};
pub use api::error::{SiteError, SiteResult};
pub use api::site::{Glyph, Site};
pub use api::types::{CaseId, Class, FaceId, PageId, SiteEvent, View, ViewFlags};
pub use core::time::FixedTimestep;
pub use core::timer::{TimerId, TimerQueue};
pub use input::pointer::{FixedProbe, LayoutProbe, PointerTracker, Rect};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::{CommandRecorder, DrawCommand, Rgba, StrokeStyle, Surface};
pub use storyboard::{Action, Fired, Guard, RunId, Step, Storyboard, StoryboardRunner};
pub use systems::fields::{
    FieldConfig, FieldKind, Particle, ParticleField, RandomSource, Rng, SequenceRng, TickContext,
};
pub use systems::rotation::{RotationController, RotationMode};

#[cfg(feature = "vectors")]
pub use renderer::vector::{VectorSurface, VectorVertex};
