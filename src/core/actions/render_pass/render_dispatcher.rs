use log::{debug, error};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::core::actions::render_pass::errors::DispatchError;
use crate::core::actions::render_pass::pass_handle::{PassHandle, PassReport};
use crate::core::actions::render_pass::ports::pixel_evaluator::PixelEvaluator;
use crate::core::data::framebuffer::{Framebuffer, FramebufferPass};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::util::calculate_worker_threads::calculate_worker_threads;

struct PassJob {
    evaluator: Arc<dyn PixelEvaluator>,
    framebuffer: Arc<Framebuffer>,
    done: SyncSender<PassReport>,
}

/// Runs render passes on a bounded rayon pool.
///
/// Passes are queued to a single coordinator thread and executed strictly
/// one after another; within a pass, rows are spread across the pool.
pub struct RenderDispatcher {
    jobs: Option<Sender<PassJob>>,
    coordinator: Option<JoinHandle<()>>,
    threads: NonZeroUsize,
}

impl RenderDispatcher {
    pub fn new(threads: NonZeroUsize) -> Result<Self, DispatchError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads.get())
            .thread_name(|index| format!("render-worker-{}", index))
            .build()?;

        let (jobs, receiver) = mpsc::channel();

        let coordinator = thread::Builder::new()
            .name("render-coordinator".to_string())
            .spawn(move || Self::coordinator_loop(&pool, &receiver))
            .map_err(DispatchError::Spawn)?;

        debug!("render dispatcher started with {} worker threads", threads);

        Ok(Self {
            jobs: Some(jobs),
            coordinator: Some(coordinator),
            threads,
        })
    }

    /// Sizes the pool for `pixel_rect`, see [`calculate_worker_threads`].
    pub fn for_pixel_rect(
        requested: Option<NonZeroUsize>,
        pixel_rect: PixelRect,
    ) -> Result<Self, DispatchError> {
        Self::new(calculate_worker_threads(requested, pixel_rect))
    }

    #[must_use]
    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    /// Queues a pass that writes `evaluator`'s colour for every pixel of
    /// `framebuffer`. The pass starts once all earlier passes have finished.
    pub fn dispatch(
        &self,
        evaluator: Arc<dyn PixelEvaluator>,
        framebuffer: Arc<Framebuffer>,
    ) -> Result<PassHandle, DispatchError> {
        if evaluator.pixel_rect() != framebuffer.pixel_rect() {
            return Err(DispatchError::SizeMismatch {
                evaluator: evaluator.pixel_rect(),
                framebuffer: framebuffer.pixel_rect(),
            });
        }

        let jobs = self.jobs.as_ref().ok_or(DispatchError::Disconnected)?;
        let (done, receiver) = mpsc::sync_channel(1);

        jobs.send(PassJob {
            evaluator,
            framebuffer,
            done,
        })
        .map_err(|_| DispatchError::Disconnected)?;

        Ok(PassHandle::new(receiver))
    }

    /// Dispatches a pass and waits for it to complete.
    pub fn render(
        &self,
        evaluator: Arc<dyn PixelEvaluator>,
        framebuffer: Arc<Framebuffer>,
    ) -> Result<PassReport, DispatchError> {
        self.dispatch(evaluator, framebuffer)?.wait()
    }

    /// Stops accepting passes and waits for queued ones to finish.
    pub fn shutdown(&mut self) {
        self.jobs.take();

        if let Some(handle) = self.coordinator.take() {
            if handle.join().is_err() {
                error!("render coordinator panicked during shutdown");
            }
        }
    }

    fn coordinator_loop(pool: &ThreadPool, jobs: &Receiver<PassJob>) {
        while let Ok(job) = jobs.recv() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                run_pass(pool, job.evaluator.as_ref(), &job.framebuffer)
            }));

            match outcome {
                // The caller may have dropped its handle.
                Ok(report) => {
                    let _ = job.done.send(report);
                }
                Err(_) => {
                    error!("render pass panicked; previous frame restored");
                }
            }
        }

        debug!("render coordinator stopped");
    }
}

impl Drop for RenderDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_pass(pool: &ThreadPool, evaluator: &dyn PixelEvaluator, framebuffer: &Framebuffer) -> PassReport {
    let pass = framebuffer.begin_pass();
    let start = Instant::now();

    let pixels_written = pool.install(|| render_rows(evaluator, &pass));
    let pass_number = pass.finish();
    let duration = start.elapsed();

    debug!(
        "pass {} wrote {} pixels in {:?}",
        pass_number, pixels_written, duration
    );

    PassReport {
        pass: pass_number,
        pixels_written,
        duration,
    }
}

fn render_rows(evaluator: &dyn PixelEvaluator, pass: &FramebufferPass<'_>) -> u64 {
    let pixel_rect = pass.pixel_rect();
    let width = pixel_rect.width();

    (0..pixel_rect.height())
        .into_par_iter()
        .map(|y| {
            for x in 0..width {
                let pixel = Point { x, y };
                pass.write(pixel, evaluator.evaluate(pixel));
            }

            u64::from(width)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::complex::Complex;
    use crate::core::data::viewport::Viewport;
    use crate::core::fractals::mandelbrot::evaluator::MandelbrotEvaluator;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    struct StubEvaluator {
        pixel_rect: PixelRect,
        shade: u8,
    }

    impl PixelEvaluator for StubEvaluator {
        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }

        fn evaluate(&self, pixel: Point) -> Colour {
            std::hint::black_box((0..200).fold(pixel.x, |acc, i| acc.wrapping_add(i)));
            Colour {
                r: self.shade,
                g: self.shade,
                b: self.shade,
            }
        }
    }

    #[derive(Debug, Default)]
    struct CountingEvaluator {
        calls: AtomicUsize,
    }

    impl PixelEvaluator for CountingEvaluator {
        fn pixel_rect(&self) -> PixelRect {
            PixelRect::new(9, 7).unwrap()
        }

        fn evaluate(&self, pixel: Point) -> Colour {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Colour {
                r: pixel.x as u8,
                g: pixel.y as u8,
                b: 9,
            }
        }
    }

    #[derive(Debug)]
    struct PanickingEvaluator {
        pixel_rect: PixelRect,
        shade: u8,
        failing_row: u32,
    }

    impl PixelEvaluator for PanickingEvaluator {
        fn pixel_rect(&self) -> PixelRect {
            self.pixel_rect
        }

        fn evaluate(&self, pixel: Point) -> Colour {
            if pixel.y == self.failing_row {
                panic!("evaluator failure");
            }

            Colour {
                r: self.shade,
                g: self.shade,
                b: self.shade,
            }
        }
    }

    fn create_dispatcher(threads: usize) -> RenderDispatcher {
        RenderDispatcher::new(NonZeroUsize::new(threads).unwrap()).unwrap()
    }

    fn stub(pixel_rect: PixelRect, shade: u8) -> Arc<dyn PixelEvaluator> {
        Arc::new(StubEvaluator { pixel_rect, shade })
    }

    #[test]
    fn test_pass_writes_every_pixel_exactly_once() {
        let dispatcher = create_dispatcher(4);
        let evaluator = Arc::new(CountingEvaluator::default());
        let framebuffer = Arc::new(Framebuffer::new(evaluator.pixel_rect()));

        let report = dispatcher
            .render(Arc::clone(&evaluator) as Arc<dyn PixelEvaluator>, Arc::clone(&framebuffer))
            .unwrap();

        assert_eq!(report.pass, 1);
        assert_eq!(report.pixels_written, 63);
        assert_eq!(evaluator.calls.load(Ordering::Relaxed), 63);

        let snapshot = framebuffer.snapshot();
        for y in 0..7 {
            for x in 0..9 {
                assert_eq!(snapshot.pixel(Point { x, y }), [x as u8, y as u8, 9, 255]);
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential_evaluation() {
        let viewport = Viewport::new(
            PixelRect::new(64, 48).unwrap(),
            -2.0,
            1.5,
            80,
            Complex::new(0.25, 0.1),
        )
        .unwrap();
        let evaluator = MandelbrotEvaluator::new(viewport);
        let framebuffer = Arc::new(Framebuffer::new(viewport.pixel_rect()));

        create_dispatcher(3)
            .render(Arc::new(evaluator), Arc::clone(&framebuffer))
            .unwrap();

        let snapshot = framebuffer.snapshot();
        for y in 0..48 {
            for x in 0..64 {
                let pixel = Point { x, y };
                assert_eq!(snapshot.pixel(pixel), evaluator.evaluate(pixel).to_rgba());
            }
        }
    }

    #[test]
    fn test_identical_passes_produce_identical_frames() {
        let dispatcher = create_dispatcher(4);
        let viewport = Viewport::new(
            PixelRect::new(40, 40).unwrap(),
            -2.84,
            2.0,
            200,
            Complex::new(0.5, 0.0),
        )
        .unwrap();
        let framebuffer = Arc::new(Framebuffer::new(viewport.pixel_rect()));

        dispatcher
            .render(Arc::new(MandelbrotEvaluator::new(viewport)), Arc::clone(&framebuffer))
            .unwrap();
        let first = framebuffer.snapshot();

        dispatcher
            .render(Arc::new(MandelbrotEvaluator::new(viewport)), Arc::clone(&framebuffer))
            .unwrap();
        let second = framebuffer.snapshot();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(second.pass, first.pass + 1);
    }

    #[test]
    fn test_queued_passes_complete_in_order() {
        let dispatcher = create_dispatcher(2);
        let pixel_rect = PixelRect::new(32, 32).unwrap();
        let framebuffer = Arc::new(Framebuffer::new(pixel_rect));

        let handles: Vec<_> = (1..=5)
            .map(|shade| dispatcher.dispatch(stub(pixel_rect, shade), Arc::clone(&framebuffer)).unwrap())
            .collect();

        let passes: Vec<u64> = handles
            .into_iter()
            .map(|handle| handle.wait().unwrap().pass)
            .collect();

        assert_eq!(passes, vec![1, 2, 3, 4, 5]);
        assert!(framebuffer.snapshot().bytes.chunks_exact(4).all(|p| p == [5, 5, 5, 255]));
    }

    #[test]
    fn test_reader_never_observes_torn_frame() {
        let dispatcher = create_dispatcher(4);
        let pixel_rect = PixelRect::new(64, 64).unwrap();
        let framebuffer = Arc::new(Framebuffer::new(pixel_rect));
        let stop = Arc::new(AtomicBool::new(false));

        let reader = {
            let framebuffer = Arc::clone(&framebuffer);
            let stop = Arc::clone(&stop);

            thread::spawn(move || {
                let mut snapshots = 0;
                while !stop.load(Ordering::Acquire) {
                    let snapshot = framebuffer.snapshot();
                    let first = snapshot.pixel(Point { x: 0, y: 0 });
                    assert!(
                        snapshot.bytes.chunks_exact(4).all(|p| p == first),
                        "snapshot after pass {} mixes pixels from different passes",
                        snapshot.pass
                    );
                    snapshots += 1;
                }
                snapshots
            })
        };

        for round in 0..40u8 {
            dispatcher
                .render(stub(pixel_rect, round.wrapping_mul(37) | 1), Arc::clone(&framebuffer))
                .unwrap();
        }

        stop.store(true, Ordering::Release);
        let snapshots = reader.join().unwrap();

        assert!(snapshots > 0);
        assert_eq!(framebuffer.completed_passes(), 40);
    }

    #[test]
    fn test_dispatch_rejects_mismatched_grid() {
        let dispatcher = create_dispatcher(1);
        let framebuffer = Arc::new(Framebuffer::new(PixelRect::new(4, 4).unwrap()));

        let result = dispatcher.dispatch(stub(PixelRect::new(5, 4).unwrap(), 1), framebuffer);

        assert!(matches!(result, Err(DispatchError::SizeMismatch { .. })));
    }

    #[test]
    fn test_panicking_pass_is_reported_and_dispatcher_survives() {
        let dispatcher = create_dispatcher(2);
        let pixel_rect = PixelRect::new(2, 2).unwrap();
        let framebuffer = Arc::new(Framebuffer::new(pixel_rect));
        let evaluator = PanickingEvaluator {
            pixel_rect,
            shade: 2,
            failing_row: 0,
        };

        let result = dispatcher.render(Arc::new(evaluator), Arc::clone(&framebuffer));
        assert!(matches!(result, Err(DispatchError::PassAborted)));

        let report = dispatcher.render(stub(pixel_rect, 3), Arc::clone(&framebuffer)).unwrap();
        assert_eq!(report.pass, 1);
    }

    #[test]
    fn test_aborted_pass_leaves_previous_frame_intact() {
        let dispatcher = create_dispatcher(1);
        let pixel_rect = PixelRect::new(8, 8).unwrap();
        let framebuffer = Arc::new(Framebuffer::new(pixel_rect));

        dispatcher.render(stub(pixel_rect, 1), Arc::clone(&framebuffer)).unwrap();

        let evaluator = PanickingEvaluator {
            pixel_rect,
            shade: 2,
            failing_row: 7,
        };
        let result = dispatcher.render(Arc::new(evaluator), Arc::clone(&framebuffer));
        assert!(matches!(result, Err(DispatchError::PassAborted)));

        let snapshot = framebuffer.snapshot();
        assert_eq!(snapshot.pass, 1);
        assert!(
            snapshot.bytes.chunks_exact(4).all(|p| p == [1, 1, 1, 255]),
            "aborted pass left pixels from two passes in the frame"
        );

        let report = dispatcher.render(stub(pixel_rect, 3), Arc::clone(&framebuffer)).unwrap();
        assert_eq!(report.pass, 2);
        assert!(framebuffer.snapshot().bytes.chunks_exact(4).all(|p| p == [3, 3, 3, 255]));
    }

    #[test]
    fn test_try_wait_eventually_reports() {
        let dispatcher = create_dispatcher(2);
        let pixel_rect = PixelRect::new(16, 16).unwrap();
        let framebuffer = Arc::new(Framebuffer::new(pixel_rect));
        let mut handle = dispatcher.dispatch(stub(pixel_rect, 1), framebuffer).unwrap();

        let start = Instant::now();
        while !handle.is_finished() {
            assert!(start.elapsed() < Duration::from_secs(5), "pass did not finish");
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(handle.try_wait().unwrap().map(|r| r.pixels_written), Some(256));
    }

    #[test]
    fn test_shutdown_joins_coordinator_after_aborted_pass() {
        let mut dispatcher = create_dispatcher(1);
        let pixel_rect = PixelRect::new(2, 2).unwrap();
        let evaluator = PanickingEvaluator {
            pixel_rect,
            shade: 1,
            failing_row: 1,
        };
        let handle = dispatcher
            .dispatch(Arc::new(evaluator), Arc::new(Framebuffer::new(pixel_rect)))
            .unwrap();

        dispatcher.shutdown();

        assert!(matches!(handle.wait(), Err(DispatchError::PassAborted)));
        assert!(dispatcher.coordinator.is_none());
        dispatcher.shutdown();
    }

    #[test]
    fn test_dispatch_after_shutdown_is_disconnected() {
        let mut dispatcher = create_dispatcher(1);
        let pixel_rect = PixelRect::new(2, 2).unwrap();
        dispatcher.shutdown();

        let result = dispatcher.dispatch(stub(pixel_rect, 1), Arc::new(Framebuffer::new(pixel_rect)));

        assert!(matches!(result, Err(DispatchError::Disconnected)));
    }

    #[test]
    fn test_for_pixel_rect_caps_threads_at_rows() {
        let dispatcher =
            RenderDispatcher::for_pixel_rect(NonZeroUsize::new(8), PixelRect::new(10, 2).unwrap())
                .unwrap();

        assert_eq!(dispatcher.threads().get(), 2);
    }
}
