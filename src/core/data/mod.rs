pub mod colour;
pub mod complex;
pub mod framebuffer;
pub mod pixel_rect;
pub mod point;
pub mod viewport;
