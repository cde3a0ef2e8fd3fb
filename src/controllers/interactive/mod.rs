//! Interactive run loop for the raster engine.
//!
//! The engine owns the viewport and the framebuffer. Input sources feed it
//! [`InputCommand`]s, the [`RecomputeTrigger`] decides whether a tick needs a
//! fresh render pass, and presenters receive the framebuffer once per tick:
//! - **Input**: [`InputSource`] polled at the start of every tick
//! - **Output**: [`FramePresenter`] handed the latest complete frame
//! - **Core**: render passes run through `core::actions::render_pass`

mod engine;
pub mod errors;
pub mod input_command;
pub mod ports;
pub mod recompute_trigger;

pub use engine::{Control, Engine, RunSummary, TickOutcome};
pub use errors::EngineError;
pub use input_command::{InputCommand, InputCommandError};
pub use ports::{FramePresenter, InputSource};
pub use recompute_trigger::RecomputeTrigger;
