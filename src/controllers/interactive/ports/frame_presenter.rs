use crate::core::data::framebuffer::FrameSnapshot;

/// Receives the current frame once per presentation tick.
pub trait FramePresenter {
    /// `frame.pass` only changes when a new pass has completed since the
    /// previous tick.
    fn present(&mut self, frame: &FrameSnapshot);
}
