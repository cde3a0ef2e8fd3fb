use crate::core::actions::render_pass::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::util::map_range::map_range;

pub const MAX_LEVEL: f64 = 255.0;
/// Levels below this render black along with the interior.
pub const LEVEL_FLOOR: f64 = 20.0;

/// Maps an escape count to a brightness level in `[0, 255]` and derives each
/// channel from it with its own curve: quadratic red, linear green and
/// square-root blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandelbrotRampColourMap {
    max_iterations: u32,
}

impl ColourMap<u32> for MandelbrotRampColourMap {
    fn map(&self, iterations: u32) -> Colour {
        level_to_colour(self.level(iterations))
    }
}

impl MandelbrotRampColourMap {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        assert!(max_iterations > 0, "Maximum iterations must be greater than zero");

        Self { max_iterations }
    }

    /// Brightness level for an escape count, with the interior and the
    /// darkest levels forced to 0.
    #[must_use]
    pub fn level(&self, iterations: u32) -> f64 {
        let level = map_range(
            f64::from(iterations),
            0.0,
            f64::from(self.max_iterations),
            0.0,
            MAX_LEVEL,
        );

        if iterations == self.max_iterations || level < LEVEL_FLOOR {
            0.0
        } else {
            level
        }
    }
}

/// Channel curves for a brightness level. Each channel is truncated to 8 bits.
#[must_use]
pub fn level_to_colour(level: f64) -> Colour {
    let red = map_range(level * level, 0.0, MAX_LEVEL * MAX_LEVEL, 0.0, 255.0);
    let green = map_range(level / 2.0, 0.0, MAX_LEVEL / 2.0, 0.0, 255.0);
    let blue = map_range(level.sqrt(), 0.0, MAX_LEVEL.sqrt(), 0.0, 255.0);

    Colour {
        r: red as u8,
        g: green as u8,
        b: blue as u8,
    }
}
