use std::error::Error;
use std::fmt;
use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;
pub const DEFAULT_PLANE_MIN: f64 = -2.84;
pub const DEFAULT_PLANE_MAX: f64 = 2.0;
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;
pub const DEFAULT_CENTER: Complex = Complex::new(0.5, 0.0);

pub const PAN_STEP: f64 = 0.05;
pub const ZOOM_MIN_STEP: f64 = 0.15;
pub const ZOOM_MAX_STEP: f64 = 0.10;
pub const ZOOM_ITERATION_STEP: u32 = 5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidPlaneRange { min: f64, max: f64 },
    ZeroMaxIterations,
    NonFiniteValue,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlaneRange { min, max } => {
                write!(f, "plane max {} must be greater than plane min {}", max, min)
            }
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::NonFiniteValue => {
                write!(f, "viewport coordinates must be finite")
            }
        }
    }
}

impl Error for ViewportError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Parameters mapping the pixel grid onto the complex plane.
///
/// The same `[plane_min, plane_max]` range is used for both axes and `center`
/// is subtracted from the mapped coordinate before iterating. Every value of
/// this type satisfies `plane_max > plane_min` and `max_iterations >= 1`;
/// edits that would break either are refused or clamped.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pixel_rect: PixelRect,
    plane_min: f64,
    plane_max: f64,
    max_iterations: u32,
    center: Complex,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pixel_rect: PixelRect::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
                .unwrap_or_else(|_| unreachable!("default dimensions are non-zero")),
            plane_min: DEFAULT_PLANE_MIN,
            plane_max: DEFAULT_PLANE_MAX,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            center: DEFAULT_CENTER,
        }
    }
}

impl Viewport {
    pub fn new(
        pixel_rect: PixelRect,
        plane_min: f64,
        plane_max: f64,
        max_iterations: u32,
        center: Complex,
    ) -> Result<Self, ViewportError> {
        if !plane_min.is_finite() || !plane_max.is_finite() || !center.is_finite() {
            return Err(ViewportError::NonFiniteValue);
        }

        if plane_max <= plane_min {
            return Err(ViewportError::InvalidPlaneRange {
                min: plane_min,
                max: plane_max,
            });
        }

        if max_iterations == 0 {
            return Err(ViewportError::ZeroMaxIterations);
        }

        Ok(Self {
            pixel_rect,
            plane_min,
            plane_max,
            max_iterations,
            center,
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn plane_min(&self) -> f64 {
        self.plane_min
    }

    #[must_use]
    pub fn plane_max(&self) -> f64 {
        self.plane_max
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        self.center
    }

    pub fn pan(&mut self, direction: PanDirection) {
        match direction {
            PanDirection::Left => self.center.real -= PAN_STEP,
            PanDirection::Right => self.center.real += PAN_STEP,
            PanDirection::Down => self.center.imag += PAN_STEP,
            PanDirection::Up => self.center.imag -= PAN_STEP,
        }
    }

    /// Narrows the plane range and deepens the iteration bound.
    ///
    /// Refused, leaving the viewport untouched, when the narrowed range would
    /// be empty.
    pub fn zoom_in(&mut self) -> Result<(), ViewportError> {
        let min = self.plane_min + ZOOM_MIN_STEP;
        let max = self.plane_max - ZOOM_MAX_STEP;

        if max <= min {
            return Err(ViewportError::InvalidPlaneRange { min, max });
        }

        self.plane_min = min;
        self.plane_max = max;
        self.max_iterations = self.max_iterations.saturating_add(ZOOM_ITERATION_STEP);

        Ok(())
    }

    /// Widens the plane range and lowers the iteration bound, never below 1.
    pub fn zoom_out(&mut self) {
        self.plane_min -= ZOOM_MIN_STEP;
        self.plane_max += ZOOM_MAX_STEP;
        self.max_iterations = self
            .max_iterations
            .saturating_sub(ZOOM_ITERATION_STEP)
            .max(1);
    }
}
