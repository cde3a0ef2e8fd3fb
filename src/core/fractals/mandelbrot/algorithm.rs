use crate::core::actions::render_pass::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::util::pixel_to_complex_coords::pixel_to_complex_coords;

pub const ESCAPE_THRESHOLD: f64 = 2.0;

/// Escape-time iteration of `z → z² + c`, starting from `z = c`.
///
/// A point escapes once `re(z) + im(z) > 2`. That is not the usual
/// `|z|² > 4` test and is kept as is, so renders stay comparable with
/// earlier output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    viewport: Viewport,
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;

    /// Number of iterations completed before escaping, or `max_iterations`
    /// if the orbit never escaped.
    fn compute(&self, pixel: Point) -> u32 {
        let c = pixel_to_complex_coords(pixel, &self.viewport);
        let mut z = c;

        for iteration in 0..self.viewport.max_iterations() {
            z = z * z + c;

            if z.component_sum() > ESCAPE_THRESHOLD {
                return iteration;
            }
        }

        self.viewport.max_iterations()
    }
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
