use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::actions::render_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::render_pass::ports::pixel_evaluator::PixelEvaluator;
use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_map::MandelbrotRampColourMap;

/// Colours pixels for one immutable viewport snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotEvaluator {
    algorithm: MandelbrotAlgorithm,
    colour_map: MandelbrotRampColourMap,
}

impl MandelbrotEvaluator {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            algorithm: MandelbrotAlgorithm::new(viewport),
            colour_map: MandelbrotRampColourMap::new(viewport.max_iterations()),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        self.algorithm.viewport()
    }
}

impl PixelEvaluator for MandelbrotEvaluator {
    fn pixel_rect(&self) -> PixelRect {
        self.viewport().pixel_rect()
    }

    fn evaluate(&self, pixel: Point) -> Colour {
        self.colour_map.map(self.algorithm.compute(pixel))
    }
}

/// Colour of `pixel` under `viewport`.
#[must_use]
pub fn evaluate(pixel: Point, viewport: &Viewport) -> Colour {
    MandelbrotEvaluator::new(*viewport).evaluate(pixel)
}
