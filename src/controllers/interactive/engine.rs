use log::{debug, info, warn};
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::controllers::interactive::errors::EngineError;
use crate::controllers::interactive::input_command::InputCommand;
use crate::controllers::interactive::ports::{FramePresenter, InputSource};
use crate::controllers::interactive::recompute_trigger::RecomputeTrigger;
use crate::core::actions::render_pass::pass_handle::PassReport;
use crate::core::actions::render_pass::render_dispatcher::RenderDispatcher;
use crate::core::data::framebuffer::{FrameSnapshot, Framebuffer};
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::evaluator::MandelbrotEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered(PassReport),
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub ticks: u64,
    pub passes: u64,
}

/// Owns the viewport, the framebuffer and the dispatcher, and re-renders only
/// when the viewport has changed.
///
/// Input edits the engine's own viewport. Each pass renders an immutable
/// copy taken at dispatch time, and input is only applied between ticks, so
/// a pass never sees a half-edited viewport.
pub struct Engine {
    viewport: Viewport,
    trigger: RecomputeTrigger,
    dispatcher: RenderDispatcher,
    framebuffer: Arc<Framebuffer>,
    frame: FrameSnapshot,
}

impl Engine {
    #[must_use]
    pub fn new(viewport: Viewport, dispatcher: RenderDispatcher) -> Self {
        let framebuffer = Arc::new(Framebuffer::new(viewport.pixel_rect()));
        let frame = framebuffer.snapshot();

        Self {
            viewport,
            trigger: RecomputeTrigger::new(),
            dispatcher,
            framebuffer,
            frame,
        }
    }

    /// Builds an engine with a worker pool sized for the viewport's grid.
    pub fn from_viewport(
        viewport: Viewport,
        threads: Option<NonZeroUsize>,
    ) -> Result<Self, EngineError> {
        let dispatcher = RenderDispatcher::for_pixel_rect(threads, viewport.pixel_rect())?;

        Ok(Self::new(viewport, dispatcher))
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn framebuffer(&self) -> &Arc<Framebuffer> {
        &self.framebuffer
    }

    /// Frame handed to the presenter on the last tick.
    #[must_use]
    pub fn frame(&self) -> &FrameSnapshot {
        &self.frame
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.trigger.is_dirty()
    }

    pub fn apply(&mut self, command: InputCommand) -> Control {
        match command {
            InputCommand::Pan(direction) => {
                self.viewport.pan(direction);
            }
            InputCommand::ZoomIn => {
                if let Err(err) = self.viewport.zoom_in() {
                    warn!("zoom in refused: {}", err);
                    return Control::Continue;
                }
            }
            InputCommand::ZoomOut => {
                self.viewport.zoom_out();
            }
            InputCommand::Quit => return Control::Quit,
        }

        let generation = self.trigger.mark_dirty();
        debug!("applied {} (generation {}): {:?}", command, generation, self.viewport);

        Control::Continue
    }

    /// Renders a full pass if the viewport changed since the last completed
    /// pass, blocking until the pass is done.
    pub fn tick(&mut self) -> Result<TickOutcome, EngineError> {
        let Some(generation) = self.trigger.pending() else {
            return Ok(TickOutcome::Unchanged);
        };

        let evaluator = Arc::new(MandelbrotEvaluator::new(self.viewport));
        let report = self
            .dispatcher
            .render(evaluator, Arc::clone(&self.framebuffer))?;

        self.trigger.complete(generation);
        self.frame.pass = self.framebuffer.read_into(&mut self.frame.bytes);

        Ok(TickOutcome::Rendered(report))
    }

    /// Polls input, recomputes when needed and presents, once per tick,
    /// until a [`InputCommand::Quit`] arrives.
    pub fn run<I, P>(&mut self, input: &mut I, presenter: &mut P) -> Result<RunSummary, EngineError>
    where
        I: InputSource,
        P: FramePresenter,
    {
        let mut summary = RunSummary::default();
        info!(
            "engine started: {}x{}, {} worker threads",
            self.viewport.pixel_rect().width(),
            self.viewport.pixel_rect().height(),
            self.dispatcher.threads()
        );

        loop {
            for command in input.poll() {
                if self.apply(command) == Control::Quit {
                    info!(
                        "engine stopped after {} ticks and {} passes",
                        summary.ticks, summary.passes
                    );
                    return Ok(summary);
                }
            }

            if let TickOutcome::Rendered(report) = self.tick()? {
                summary.passes += 1;
                debug!("frame {} ready in {:?}", report.pass, report.duration);
            }

            presenter.present(&self.frame);
            summary.ticks += 1;
        }
    }
}
