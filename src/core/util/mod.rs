pub mod calculate_worker_threads;
pub mod map_range;
pub mod pixel_to_complex_coords;
