/// Linearly maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Values outside the input range extrapolate. The input range must not be
/// empty; every caller derives it from a validated [`Viewport`].
///
/// [`Viewport`]: crate::core::data::viewport::Viewport
#[inline]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    debug_assert!(in_max != in_min, "map_range called with an empty input range");

    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
