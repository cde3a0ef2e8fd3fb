use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

/// A pure pixel → colour function, evaluated concurrently by render workers.
pub trait PixelEvaluator: Send + Sync {
    /// Grid the evaluator was configured for.
    fn pixel_rect(&self) -> PixelRect;

    fn evaluate(&self, pixel: Point) -> Colour;
}
