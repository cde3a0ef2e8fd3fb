//! Ports between the engine run loop and the presentation/input layer.

pub mod frame_presenter;
pub mod input_source;

pub use frame_presenter::FramePresenter;
pub use input_source::InputSource;
