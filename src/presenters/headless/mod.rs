pub mod presenter;

pub use presenter::{FrameStats, HeadlessPresenter};
