use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;

pub const BYTES_PER_PIXEL: usize = 4;

/// Fixed-size RGBA grid shared between render workers and the presenter.
///
/// Each pixel is a single `AtomicU32` holding its packed RGBA bytes, so a
/// pixel is always replaced as a whole. Writes are only possible through a
/// [`FramebufferPass`], which holds the write side of `pass_lock` for the
/// duration of a render pass; readers take the read side, so a reader sees
/// either the frame before a pass or the frame after it, never a mix.
#[derive(Debug)]
pub struct Framebuffer {
    pixel_rect: PixelRect,
    pixels: Vec<AtomicU32>,
    pass_lock: RwLock<u64>,
}

/// Copy of the framebuffer contents taken between passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    /// Number of passes completed when the snapshot was taken.
    pub pass: u64,
    pub pixel_rect: PixelRect,
    pub bytes: Vec<u8>,
}

impl FrameSnapshot {
    #[must_use]
    pub fn pixel(&self, point: Point) -> [u8; 4] {
        let index = self.pixel_rect.index_of(point) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.bytes[index..index + BYTES_PER_PIXEL]);
        rgba
    }
}

/// Exclusive write access to a [`Framebuffer`] for one render pass.
///
/// The pass is `Sync`: many workers may write through a shared reference,
/// each to its own pixels. A pass dropped without [`FramebufferPass::finish`],
/// including one unwound by a panicking worker, puts the previous frame back
/// before releasing the lock.
pub struct FramebufferPass<'a> {
    completed: RwLockWriteGuard<'a, u64>,
    pixel_rect: PixelRect,
    pixels: &'a [AtomicU32],
    previous: Vec<u32>,
    finished: bool,
}

fn pack(rgba: [u8; 4]) -> u32 {
    u32::from_ne_bytes(rgba)
}

impl Framebuffer {
    /// Creates a zeroed (transparent black) framebuffer.
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            pixels: (0..pixel_rect.size()).map(|_| AtomicU32::new(0)).collect(),
            pass_lock: RwLock::new(0),
        }
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.pixel_rect.size() * BYTES_PER_PIXEL
    }

    /// Number of render passes that have finished writing.
    #[must_use]
    pub fn completed_passes(&self) -> u64 {
        *self.pass_lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until no other pass is in progress, then opens a new one.
    pub(crate) fn begin_pass(&self) -> FramebufferPass<'_> {
        let completed = self.pass_lock.write().unwrap_or_else(PoisonError::into_inner);
        let previous = self
            .pixels
            .iter()
            .map(|pixel| pixel.load(Ordering::Acquire))
            .collect();

        FramebufferPass {
            completed,
            pixel_rect: self.pixel_rect,
            pixels: &self.pixels,
            previous,
            finished: false,
        }
    }

    /// Copies the RGBA bytes into `dst`, waiting for any in-flight pass to
    /// finish first. Returns the completed pass count the bytes belong to.
    ///
    /// # Panics
    /// Panics if `dst` is not exactly [`Framebuffer::byte_len`] bytes long.
    pub fn read_into(&self, dst: &mut [u8]) -> u64 {
        let completed = self.pass_lock.read().unwrap_or_else(PoisonError::into_inner);
        self.copy_pixels(dst);
        *completed
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut bytes = vec![0; self.byte_len()];
        let pass = self.read_into(&mut bytes);

        FrameSnapshot {
            pass,
            pixel_rect: self.pixel_rect,
            bytes,
        }
    }

    /// Like [`Framebuffer::snapshot`], but returns `None` instead of waiting
    /// while a pass is being written.
    #[must_use]
    pub fn try_snapshot(&self) -> Option<FrameSnapshot> {
        let completed = match self.pass_lock.try_read() {
            Ok(guard) => guard,
            Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(std::sync::TryLockError::WouldBlock) => return None,
        };

        let mut bytes = vec![0; self.byte_len()];
        self.copy_pixels(&mut bytes);

        Some(FrameSnapshot {
            pass: *completed,
            pixel_rect: self.pixel_rect,
            bytes,
        })
    }

    fn copy_pixels(&self, dst: &mut [u8]) {
        assert_eq!(
            dst.len(),
            self.byte_len(),
            "dst length {} does not match framebuffer length {}",
            dst.len(),
            self.byte_len()
        );

        for (pixel, dst_pixel) in self.pixels.iter().zip(dst.chunks_exact_mut(BYTES_PER_PIXEL)) {
            dst_pixel.copy_from_slice(&pixel.load(Ordering::Acquire).to_ne_bytes());
        }
    }
}

impl FramebufferPass<'_> {
    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    /// Replaces the pixel at `point` with an opaque `colour`.
    ///
    /// # Panics
    /// Panics if `point` lies outside the framebuffer.
    pub fn write(&self, point: Point, colour: Colour) {
        let index = self.pixel_rect.index_of(point);
        self.pixels[index].store(pack(colour.to_rgba()), Ordering::Release);
    }

    /// Closes the pass, returning the new completed pass count.
    pub fn finish(mut self) -> u64 {
        self.finished = true;
        *self.completed += 1;
        *self.completed
    }
}

impl Drop for FramebufferPass<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }

        for (pixel, &value) in self.pixels.iter().zip(&self.previous) {
            pixel.store(value, Ordering::Release);
        }
    }
}
