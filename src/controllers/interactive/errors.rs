use std::error::Error;
use std::fmt;

use crate::core::actions::render_pass::errors::DispatchError;

#[derive(Debug)]
pub enum EngineError {
    Dispatch(DispatchError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch(err) => write!(f, "render dispatch error: {}", err),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dispatch(err) => Some(err),
        }
    }
}

impl From<DispatchError> for EngineError {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}
