pub mod colour_map;
pub mod fractal_algorithm;
pub mod pixel_evaluator;

pub use colour_map::ColourMap;
pub use fractal_algorithm::FractalAlgorithm;
pub use pixel_evaluator::PixelEvaluator;
