pub mod runner;
pub mod step;
pub mod timelines;

pub use runner::{Fired, Guard, RunId, StoryboardRunner};
pub use step::{Action, Step, Storyboard};
