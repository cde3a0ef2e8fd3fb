use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use crate::core::actions::render_pass::errors::DispatchError;

/// Outcome of one completed render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Completed pass count of the framebuffer after this pass.
    pub pass: u64,
    pub pixels_written: u64,
    pub duration: Duration,
}

/// Completion handle for a dispatched pass.
///
/// The framebuffer is stable and presentable once the handle yields a
/// report. Dropping the handle does not cancel the pass.
#[derive(Debug)]
pub struct PassHandle {
    receiver: Receiver<PassReport>,
    report: Option<PassReport>,
}

impl PassHandle {
    pub(crate) fn new(receiver: Receiver<PassReport>) -> Self {
        Self {
            receiver,
            report: None,
        }
    }

    /// Blocks until the pass has finished writing.
    pub fn wait(self) -> Result<PassReport, DispatchError> {
        if let Some(report) = self.report {
            return Ok(report);
        }

        self.receiver.recv().map_err(|_| DispatchError::PassAborted)
    }

    /// Returns the report if the pass has finished, without blocking.
    pub fn try_wait(&mut self) -> Result<Option<PassReport>, DispatchError> {
        if self.report.is_none() {
            match self.receiver.try_recv() {
                Ok(report) => self.report = Some(report),
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => return Err(DispatchError::PassAborted),
            }
        }

        Ok(self.report)
    }

    pub fn is_finished(&mut self) -> bool {
        !matches!(self.try_wait(), Ok(None))
    }
}
