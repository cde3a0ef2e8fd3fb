use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::core::data::viewport::PanDirection;

/// Discrete user command understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Pan(PanDirection),
    ZoomIn,
    ZoomOut,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommandError {
    Unknown(String),
}

impl fmt::Display for InputCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(name) => write!(f, "unknown input command: {:?}", name),
        }
    }
}

impl Error for InputCommandError {}

impl FromStr for InputCommand {
    type Err = InputCommandError;

    /// Accepts command names as well as the keys they are bound to.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Pan(PanDirection::Left)),
            "right" => Ok(Self::Pan(PanDirection::Right)),
            "up" => Ok(Self::Pan(PanDirection::Up)),
            "down" => Ok(Self::Pan(PanDirection::Down)),
            "zoom-in" | "=" | "+" => Ok(Self::ZoomIn),
            "zoom-out" | "-" => Ok(Self::ZoomOut),
            "quit" | "q" => Ok(Self::Quit),
            _ => Err(InputCommandError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for InputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pan(PanDirection::Left) => "left",
            Self::Pan(PanDirection::Right) => "right",
            Self::Pan(PanDirection::Up) => "up",
            Self::Pan(PanDirection::Down) => "down",
            Self::ZoomIn => "zoom-in",
            Self::ZoomOut => "zoom-out",
            Self::Quit => "quit",
        };

        f.write_str(name)
    }
}
