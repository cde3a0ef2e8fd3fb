use std::error::Error;
use std::fmt;
use std::io;

use crate::core::data::pixel_rect::PixelRect;

#[derive(Debug)]
pub enum DispatchError {
    ThreadPool(rayon::ThreadPoolBuildError),
    Spawn(io::Error),
    /// The coordinator thread is no longer accepting passes.
    Disconnected,
    /// A pass ended without reporting completion, e.g. an evaluator panicked.
    PassAborted,
    SizeMismatch {
        evaluator: PixelRect,
        framebuffer: PixelRect,
    },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreadPool(err) => write!(f, "failed to build render thread pool: {}", err),
            Self::Spawn(err) => write!(f, "failed to spawn render coordinator: {}", err),
            Self::Disconnected => write!(f, "render dispatcher has shut down"),
            Self::PassAborted => write!(f, "render pass ended without completing"),
            Self::SizeMismatch {
                evaluator,
                framebuffer,
            } => {
                write!(
                    f,
                    "evaluator grid {}x{} does not match framebuffer grid {}x{}",
                    evaluator.width(),
                    evaluator.height(),
                    framebuffer.width(),
                    framebuffer.height()
                )
            }
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ThreadPool(err) => Some(err),
            Self::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for DispatchError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err)
    }
}
