//! The warp transition played between sections.

pub mod context;
pub mod driver;
pub mod easing;
pub mod sequencer;

pub use context::WarpContext;
pub use sequencer::{Motion, TransitionSequencer};
