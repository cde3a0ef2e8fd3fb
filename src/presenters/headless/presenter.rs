use log::info;

use crate::controllers::interactive::ports::frame_presenter::FramePresenter;
use crate::core::data::framebuffer::FrameSnapshot;

/// Summary of a presented frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub pass: u64,
    pub lit_pixels: usize,
    pub checksum: u64,
}

impl FrameStats {
    /// `lit_pixels` counts pixels with any non-zero colour channel;
    /// `checksum` is FNV-1a over the RGBA bytes.
    #[must_use]
    pub fn from_frame(frame: &FrameSnapshot) -> Self {
        let lit_pixels = frame
            .bytes
            .chunks_exact(4)
            .filter(|rgba| rgba[..3].iter().any(|&c| c != 0))
            .count();

        let checksum = frame.bytes.iter().fold(0xcbf2_9ce4_8422_2325_u64, |hash, &byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        });

        Self {
            pass: frame.pass,
            lit_pixels,
            checksum,
        }
    }
}

/// Headless presenter: logs each newly completed frame instead of drawing it.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    last_presented_pass: u64,
    history: Vec<FrameStats>,
}

impl HeadlessPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats of every distinct frame presented so far.
    #[must_use]
    pub fn history(&self) -> &[FrameStats] {
        &self.history
    }
}

impl FramePresenter for HeadlessPresenter {
    fn present(&mut self, frame: &FrameSnapshot) {
        if frame.pass == self.last_presented_pass {
            return;
        }

        let stats = FrameStats::from_frame(frame);
        info!(
            "frame {}: {}x{}, {} lit pixels, checksum {:016x}",
            stats.pass,
            frame.pixel_rect.width(),
            frame.pixel_rect.height(),
            stats.lit_pixels,
            stats.checksum
        );

        self.last_presented_pass = frame.pass;
        self.history.push(stats);
    }
}
