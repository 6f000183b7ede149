pub mod recorder;
pub mod surface;
#[cfg(feature = "vectors")]
pub mod vector;

pub use recorder::{CommandRecorder, DrawCommand};
pub use surface::{GradientStop, Glow, RadialGradient, Rgba, StrokeStyle, Surface};
#[cfg(feature = "vectors")]
pub use vector::{VectorSurface, VectorVertex};
