use crate::core::data::point::Point;

/// Computes the raw per-pixel value of a fractal, e.g. an escape count.
pub trait FractalAlgorithm {
    type Success;

    fn compute(&self, pixel: Point) -> Self::Success;
}
