//! Renderer Actor: Dedicated thread that owns the screen.
//!
//! The display loop and the control panel each send their own region; the
//! renderer composes them into the next screen buffer, diffs it against
//! what the terminal shows, and flushes once per command.

use super::messages::RenderCommand;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::Buffer;
use crate::layout::ScreenLayout;
use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error};

/// Render statistics for logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total screen updates written.
    pub frames: u64,
    /// Total cells changed across all frames.
    pub cells_changed: u64,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
}

/// Screen state owned by the render thread.
struct Renderer<W: Write> {
    /// What the terminal currently shows.
    current: Buffer,
    /// What it should show next.
    next: Buffer,
    layout: ScreenLayout,
    diff_state: DiffState,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    writer: W,
    stats: RenderStats,
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    /// Screen buffers are the layout size clipped to the terminal size.
    fn new(writer: W, layout: ScreenLayout, terminal: (u16, u16)) -> Self {
        let (width, height) = Self::viewport(layout, terminal);
        Self {
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            layout,
            diff_state: DiffState::new(),
            output: Vec::with_capacity(65536),
            writer,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    fn viewport(layout: ScreenLayout, (width, height): (u16, u16)) -> (u16, u16) {
        (
            layout.screen.width.min(width).max(1),
            layout.screen.height.min(height).max(1),
        )
    }

    /// Handle one command. Returns `false` on shutdown.
    fn handle(&mut self, command: RenderCommand) -> io::Result<bool> {
        match command {
            RenderCommand::Frame(grid) => {
                self.next.blit(&grid, self.layout.grid.x, self.layout.grid.y);
                self.render()?;
            }
            RenderCommand::Panel(panel) => {
                self.next.blit(&panel, self.layout.panel.x, self.layout.panel.y);
                self.render()?;
            }
            RenderCommand::Resize { width, height } => {
                let (width, height) = Self::viewport(self.layout, (width, height));
                self.current.resize(width, height);
                self.next.resize(width, height);
                self.needs_full_redraw = true;
                self.render()?;
            }
            RenderCommand::Shutdown => return Ok(false),
        }
        Ok(true)
    }

    /// Perform a render cycle.
    fn render(&mut self) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.next, &mut self.output);
            self.needs_full_redraw = false;
            self.diff_state.reset();
            self.stats.cells_changed += self.next.len() as u64;
        } else {
            let result = render_diff(
                &self.current,
                &self.next,
                &mut self.output,
                &mut self.diff_state,
            );
            self.stats.cells_changed += result.cells_changed as u64;
        }

        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
            self.writer.flush()?;
        }

        self.current.copy_from(&self.next);

        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_render_us = if self.stats.avg_render_us == 0 {
            elapsed_us
        } else {
            (self.stats.avg_render_us * 15 + elapsed_us) / 16
        };

        Ok(())
    }
}

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<RenderStats>>,
}

impl RendererActor {
    /// Spawn the renderer thread writing to stdout.
    ///
    /// # Arguments
    ///
    /// * `receiver` - Channel to receive render commands from.
    /// * `layout` - Where the grid and the panel go.
    /// * `terminal` - Current terminal size.
    pub fn spawn(
        receiver: Receiver<RenderCommand>,
        layout: ScreenLayout,
        terminal: (u16, u16),
    ) -> io::Result<Self> {
        Self::spawn_with_writer(receiver, layout, terminal, io::stdout())
    }

    /// Spawn the renderer thread writing to `writer`.
    pub fn spawn_with_writer<W: Write + Send + 'static>(
        receiver: Receiver<RenderCommand>,
        layout: ScreenLayout,
        terminal: (u16, u16),
        writer: W,
    ) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("matrix-render".to_string())
            .spawn(move || {
                let mut renderer = Renderer::new(writer, layout, terminal);
                if let Err(e) = Self::run_loop(&receiver, &mut renderer) {
                    error!(error = %e, "render:terminal write failed");
                }
                renderer.stats
            })?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Wait for the render thread to finish and return its statistics.
    ///
    /// The thread exits on [`RenderCommand::Shutdown`] or when every sender
    /// is dropped.
    pub fn join(mut self) -> RenderStats {
        self.handle
            .take()
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    }

    /// Main render loop.
    fn run_loop<W: Write>(
        receiver: &Receiver<RenderCommand>,
        renderer: &mut Renderer<W>,
    ) -> io::Result<()> {
        // Disconnection means every producer is gone.
        while let Ok(command) = receiver.recv() {
            if !renderer.handle(command)? {
                break;
            }
        }
        debug!(
            frames = renderer.stats.frames,
            bytes = renderer.stats.bytes_written,
            avg_render_us = renderer.stats.avg_render_us,
            "render:stopped"
        );
        Ok(())
    }
}
