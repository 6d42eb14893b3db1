//! Display loop: capture, render, fade, overlay, present.
//!
//! Runs on its own thread at whatever pace the frame source delivers.
//! The persistent buffer is owned here and never shared; each finished
//! grid goes to the renderer as a copy.

use super::messages::RenderCommand;
use crate::buffer::Buffer;
use crate::capture::{FrameSource, SourceSpec};
use crate::config::MatrixConfig;
use crate::error::{Error, Result};
use crate::render::{FadeCompositor, FeedbackIntensity, FrameRenderer, TickerOverlay};
use crate::state::SharedState;
use crossbeam_channel::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Whether the loop keeps going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Ready for another frame.
    Running,
    /// Done; the source has been released.
    Stopped,
}

/// Why the display loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The source failed or ran out of frames.
    CaptureEnded(String),
    /// Shutdown was requested elsewhere.
    Shutdown,
    /// The renderer is gone. Also raises shutdown.
    OutputClosed,
}

/// Summary returned when the loop ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayReport {
    /// Frames presented.
    pub frames: u64,
    /// Why the loop ended.
    pub reason: StopReason,
}

/// One display activity: a source plus everything needed to turn its
/// frames into the grid.
pub struct DisplayLoop<S: FrameSource> {
    source: S,
    renderer: FrameRenderer,
    compositor: FadeCompositor,
    ticker: TickerOverlay,
    feedback: FeedbackIntensity,
    base_brightness: f32,
    /// The phosphor image, blended into every frame.
    persistent: Buffer,
    state: Arc<SharedState>,
    render_tx: Sender<RenderCommand>,
    frames: u64,
    stop: Option<StopReason>,
}

impl<S: FrameSource> DisplayLoop<S> {
    /// Build the loop. The persistent buffer starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(
        config: &MatrixConfig,
        source: S,
        state: Arc<SharedState>,
        render_tx: Sender<RenderCommand>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            renderer: FrameRenderer::new(config)?,
            compositor: FadeCompositor::new(config.fade),
            ticker: TickerOverlay::new(config),
            feedback: FeedbackIntensity::new(
                config.feedback_initial,
                config.feedback_step,
                config.feedback_max,
            ),
            base_brightness: config.base_brightness,
            persistent: Buffer::new(config.columns, config.rows),
            state,
            render_tx,
            frames: 0,
            stop: None,
        })
    }

    /// The persistent buffer as last presented.
    pub const fn persistent(&self) -> &Buffer {
        &self.persistent
    }

    /// Frames presented so far.
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one iteration.
    pub fn step(&mut self) -> LoopState {
        if self.stop.is_some() {
            return LoopState::Stopped;
        }
        if self.state.is_shutdown() {
            return self.finish(StopReason::Shutdown);
        }

        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(source = self.source.name(), error = %e, "display:capture ended");
                // Capture ending ends the whole program.
                self.state.request_shutdown();
                return self.finish(StopReason::CaptureEnded(e.to_string()));
            }
        };

        let brightness = self.base_brightness + self.feedback.value();
        let next = self.renderer.render(&frame, brightness);
        self.compositor.composite(&mut self.persistent, &next);

        let headline = self.state.headline();
        self.ticker.overlay(&mut self.persistent, &headline);

        if self
            .render_tx
            .send(RenderCommand::Frame(Box::new(self.persistent.clone())))
            .is_err()
        {
            self.state.request_shutdown();
            return self.finish(StopReason::OutputClosed);
        }
        self.frames += 1;
        self.feedback.decay();

        if self.state.is_shutdown() {
            return self.finish(StopReason::Shutdown);
        }
        LoopState::Running
    }

    /// Step until stopped.
    pub fn run(mut self) -> DisplayReport {
        info!(source = self.source.name(), "display:started");
        while self.step() == LoopState::Running {}
        let report = DisplayReport {
            frames: self.frames,
            reason: self.stop.take().unwrap_or(StopReason::Shutdown),
        };
        info!(frames = report.frames, reason = ?report.reason, "display:stopped");
        report
    }

    fn finish(&mut self, reason: StopReason) -> LoopState {
        self.source.release();
        debug!(source = self.source.name(), "display:source released");
        self.stop = Some(reason);
        LoopState::Stopped
    }
}

/// Open `spec` on a new thread and run the display loop there.
///
/// A source that fails to open requests shutdown and is reported through
/// the join handle.
pub fn spawn_display(
    config: MatrixConfig,
    spec: SourceSpec,
    state: Arc<SharedState>,
    render_tx: Sender<RenderCommand>,
) -> std::io::Result<JoinHandle<Result<DisplayReport>>> {
    thread::Builder::new()
        .name("matrix-display".to_string())
        .spawn(move || {
            let source = match spec.open() {
                Ok(source) => source,
                Err(e) => {
                    state.request_shutdown();
                    return Err(Error::from(e));
                }
            };
            let display = DisplayLoop::new(&config, source, Arc::clone(&state), render_tx)
                .inspect_err(|_| state.request_shutdown())?;
            Ok(display.run())
        })
}
