use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::util::map_range::map_range;

/// Maps a pixel to the starting point of its orbit.
///
/// Each axis maps `[0, extent)` onto `[plane_min, plane_max]`, with the same
/// plane range on both axes, and the viewport centre is then subtracted.
///
/// # Panics
/// Panics if `pixel` lies outside the viewport's pixel rect.
pub fn pixel_to_complex_coords(pixel: Point, viewport: &Viewport) -> Complex {
    let pixel_rect = viewport.pixel_rect();

    assert!(
        pixel_rect.contains_point(pixel),
        "point (x: {}, y: {}) is outside the {}x{} pixel rect",
        pixel.x,
        pixel.y,
        pixel_rect.width(),
        pixel_rect.height()
    );

    let real = map_range(
        f64::from(pixel.x),
        0.0,
        f64::from(pixel_rect.width()),
        viewport.plane_min(),
        viewport.plane_max(),
    );
    let imag = map_range(
        f64::from(pixel.y),
        0.0,
        f64::from(pixel_rect.height()),
        viewport.plane_min(),
        viewport.plane_max(),
    );

    Complex { real, imag } - viewport.center()
}
