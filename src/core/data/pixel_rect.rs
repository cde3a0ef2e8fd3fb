use std::error::Error;
use std::fmt;
use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    ZeroSize { width: u32, height: u32 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize { width, height } => {
                write!(f, "pixel rect size must be at least 1x1: {}x{}", width, height)
            }
        }
    }
}

impl Error for PixelRectError {}

/// Dimensions of the raster grid. Pixels are addressed from (0, 0) to
/// (width - 1, height - 1) and stored row-major.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    width: u32,
    height: u32,
}

impl PixelRect {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelRectError> {
        if width == 0 || height == 0 {
            return Err(PixelRectError::ZeroSize { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `point`.
    ///
    /// # Panics
    /// Panics if `point` lies outside the rect.
    #[must_use]
    pub fn index_of(&self, point: Point) -> usize {
        assert!(
            self.contains_point(point),
            "pixel at x:{}, y:{} outside of {}x{} rect",
            point.x,
            point.y,
            self.width,
            self.height
        );

        point.y as usize * self.width as usize + point.x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_new_valid() {
        let rect = PixelRect::new(100, 50).unwrap();

        assert_eq!(rect.width(), 100);
        assert_eq!(rect.height(), 50);
        assert_eq!(rect.size(), 5000);
    }

    #[test]
    fn test_single_pixel_rect_is_valid() {
        let rect = PixelRect::new(1, 1).unwrap();

        assert_eq!(rect.size(), 1);
        assert!(rect.contains_point(Point { x: 0, y: 0 }));
    }

    #[test]
    fn test_pixel_rect_dimensions_must_be_positive() {
        assert_eq!(
            PixelRect::new(0, 10),
            Err(PixelRectError::ZeroSize { width: 0, height: 10 })
        );
        assert_eq!(
            PixelRect::new(10, 0),
            Err(PixelRectError::ZeroSize { width: 10, height: 0 })
        );
    }

    #[test]
    fn test_pixel_rect_contains_point() {
        let rect = PixelRect::new(10, 5).unwrap();

        assert!(rect.contains_point(Point { x: 0, y: 0 }));
        assert!(rect.contains_point(Point { x: 9, y: 4 }));
        assert!(!rect.contains_point(Point { x: 10, y: 4 }));
        assert!(!rect.contains_point(Point { x: 9, y: 5 }));
    }

    #[test]
    fn test_index_of_is_row_major() {
        let rect = PixelRect::new(3, 3).unwrap();

        assert_eq!(rect.index_of(Point { x: 0, y: 0 }), 0);
        assert_eq!(rect.index_of(Point { x: 1, y: 1 }), 4);
        assert_eq!(rect.index_of(Point { x: 2, y: 2 }), 8);
        assert_eq!(rect.index_of(Point { x: 0, y: 2 }), 6);
    }

    #[test]
    #[should_panic(expected = "outside of 3x3 rect")]
    fn test_index_of_out_of_range_panics() {
        let rect = PixelRect::new(3, 3).unwrap();

        let _ = rect.index_of(Point { x: 3, y: 0 });
    }
}
