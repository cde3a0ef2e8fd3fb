use crate::core::data::pixel_rect::PixelRect;
use std::num::NonZeroUsize;

/// Worker pool size for rendering `pixel_rect`.
///
/// Uses `requested` when given, otherwise the host's available parallelism,
/// and never more threads than there are rows, since rows are the unit of
/// work handed to the pool.
pub fn calculate_worker_threads(requested: Option<NonZeroUsize>, pixel_rect: PixelRect) -> NonZeroUsize {
    let threads = requested.unwrap_or_else(|| {
        std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
    });

    let rows = NonZeroUsize::new(pixel_rect.height() as usize).unwrap_or(NonZeroUsize::MIN);

    threads.min(rows)
}
