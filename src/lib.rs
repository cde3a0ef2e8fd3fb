mod controllers;
mod core;
mod input;
mod presenters;

pub use crate::controllers::interactive::{
    Control, Engine, EngineError, FramePresenter, InputCommand, InputCommandError, InputSource,
    RecomputeTrigger, RunSummary, TickOutcome,
};
pub use crate::core::actions::render_pass::errors::DispatchError;
pub use crate::core::actions::render_pass::pass_handle::{PassHandle, PassReport};
pub use crate::core::actions::render_pass::ports::{ColourMap, FractalAlgorithm, PixelEvaluator};
pub use crate::core::actions::render_pass::render_dispatcher::RenderDispatcher;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::framebuffer::{FrameSnapshot, Framebuffer};
pub use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
pub use crate::core::data::point::Point;
pub use crate::core::data::viewport::{
    DEFAULT_CENTER, DEFAULT_HEIGHT, DEFAULT_MAX_ITERATIONS, DEFAULT_PLANE_MAX, DEFAULT_PLANE_MIN,
    DEFAULT_WIDTH, PanDirection, Viewport, ViewportError,
};
pub use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
pub use crate::core::fractals::mandelbrot::colour_map::{MandelbrotRampColourMap, level_to_colour};
pub use crate::core::fractals::mandelbrot::evaluator::{MandelbrotEvaluator, evaluate};
pub use crate::input::script::ScriptInput;
pub use crate::presenters::headless::{FrameStats, HeadlessPresenter};
