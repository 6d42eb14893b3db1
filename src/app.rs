//! App: ties the terminal, the actors, the fetcher and the display loop
//! together.
//!
//! The main thread runs the control panel. Everything else runs on its
//! own thread and stops when the shared shutdown flag is raised.

use crate::actor::{
    spawn_display, DisplayReport, InputActor, InputEvent, RenderCommand, RenderStats,
    RendererActor,
};
use crate::buffer::Buffer;
use crate::capture::SourceSpec;
use crate::config::MatrixConfig;
use crate::error::{Error, Result};
use crate::layout::{Rect, ScreenLayout};
use crate::news::{NewsApiClient, NewsFetcher};
use crate::state::SharedState;
use crate::terminal::TerminalSession;
use crate::widget::{ControlPanel, Widget};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How long the panel waits for input before checking the shutdown flag.
const PANEL_POLL: Duration = Duration::from_millis(50);

/// Configuration for a run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Grid, effects and news settings.
    pub matrix: MatrixConfig,
    /// Where frames come from.
    pub source: SourceSpec,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// How long to wait for a busy news fetch at exit.
    pub shutdown_grace: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        let matrix = MatrixConfig::default();
        let source = if SourceSpec::CAMERA_AVAILABLE {
            SourceSpec::Camera { index: 0 }
        } else {
            SourceSpec::Pattern {
                width: matrix.width_px(),
                height: u32::from(matrix.rows) * 12,
                fps: 30,
                limit: None,
            }
        };
        Self {
            matrix,
            source,
            input_poll_timeout: Duration::from_millis(10),
            alternate_screen: true,
            shutdown_grace: Duration::from_millis(500),
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone)]
pub struct AppReport {
    /// Display loop outcome.
    pub display: DisplayReport,
    /// Terminal output statistics.
    pub render: RenderStats,
    /// Whether the news fetcher finished within the grace period.
    pub fetcher_joined: bool,
}

/// Run until the quit key is pressed or the frame source ends.
///
/// The terminal is restored before this returns.
///
/// # Errors
///
/// Returns an error for an invalid configuration, a terminal that cannot
/// be set up, a thread that cannot be spawned, a frame source that cannot
/// be opened, or a panicked display thread.
pub fn run(config: AppConfig) -> Result<AppReport> {
    let AppConfig {
        matrix,
        source,
        input_poll_timeout,
        alternate_screen,
        shutdown_grace,
    } = config;
    matrix.validate()?;

    let state = Arc::new(SharedState::new(
        matrix.news.loading_text.clone(),
        matrix.refresh,
    ));
    let layout = ScreenLayout::new(matrix.columns, matrix.rows);
    let session = TerminalSession::enter(alternate_screen)?;

    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let (render_tx, render_rx) = bounded::<RenderCommand>(16);

    let renderer = RendererActor::spawn(render_rx, layout, session.size())?;
    let input = InputActor::spawn(input_tx, input_poll_timeout)?;
    let fetcher = NewsFetcher::spawn(
        NewsApiClient::new(matrix.news.clone()),
        Arc::clone(&state),
        &matrix.news,
    )?;
    let display = spawn_display(matrix, source, Arc::clone(&state), render_tx.clone())?;
    info!("app:started");

    let mut panel = ControlPanel::new(
        Rect::from_size(layout.panel.width, layout.panel.height),
        Arc::clone(&state),
    );
    run_panel(&mut panel, &input_rx, &render_tx, &state);

    // Teardown: stop producers before the renderer, terminal last.
    state.request_shutdown();
    stop_input(input, input_rx);
    let display = display.join().map_err(|_| Error::ThreadPanic("display"));
    let fetcher_joined = fetcher.join(shutdown_grace);
    let _ = render_tx.send(RenderCommand::Shutdown);
    let render = renderer.join();
    drop(session);
    info!(frames = render.frames, bytes = render.bytes_written, "app:stopped");

    Ok(AppReport {
        display: display??,
        render,
        fetcher_joined,
    })
}

/// Stop the input thread. The receiver goes first so a send blocked on
/// a full channel fails instead of stalling the join.
fn stop_input(input: InputActor, input_rx: Receiver<InputEvent>) {
    drop(input_rx);
    input.join();
}

/// Control panel loop. Returns once shutdown is raised.
fn run_panel(
    panel: &mut ControlPanel,
    input_rx: &Receiver<InputEvent>,
    render_tx: &Sender<RenderCommand>,
    state: &SharedState,
) {
    while !state.is_shutdown() {
        if panel.needs_redraw() {
            let bounds = panel.bounds();
            let mut row = Buffer::new(bounds.width.max(1), bounds.height.max(1));
            panel.render(&mut row);
            if render_tx.send(RenderCommand::Panel(Box::new(row))).is_err() {
                state.request_shutdown();
                break;
            }
            panel.clear_redraw();
        }

        match input_rx.recv_timeout(PANEL_POLL) {
            Ok(event) if event.is_quit() => {
                info!("app:quit requested");
                state.request_shutdown();
            }
            Ok(InputEvent::Resize { width, height }) => {
                let _ = render_tx.send(RenderCommand::Resize { width, height });
            }
            Ok(InputEvent::Error(message)) => {
                warn!(error = %message, "app:input error");
            }
            Ok(InputEvent::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                state.request_shutdown();
            }
            Ok(event) => {
                panel.handle_input(&event);
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, KeyModifiers};
    use crate::config::RefreshConfig;
    use crossbeam_channel::unbounded;
    use std::thread;

    fn setup() -> (ControlPanel, Arc<SharedState>) {
        let state = Arc::new(SharedState::new("", RefreshConfig::default()));
        let panel = ControlPanel::new(Rect::from_size(60, 1), Arc::clone(&state));
        (panel, state)
    }

    #[test]
    fn test_panel_keys_then_quit() {
        let (mut panel, state) = setup();
        let (input_tx, input_rx) = unbounded();
        let (render_tx, render_rx) = unbounded();

        input_tx.send(InputEvent::key(KeyCode::Right)).unwrap();
        input_tx.send(InputEvent::key(KeyCode::Right)).unwrap();
        input_tx.send(InputEvent::key(KeyCode::Char('q'))).unwrap();
        run_panel(&mut panel, &input_rx, &render_tx, &state);

        assert!(state.is_shutdown());
        assert_eq!(state.refresh_secs(), 32);
        let panels: Vec<_> = render_rx
            .try_iter()
            .filter_map(|command| match command {
                RenderCommand::Panel(row) => Some(row.row_text(0)),
                _ => None,
            })
            .collect();
        // Initial draw plus one per change
        assert_eq!(panels.len(), 3);
        assert!(panels[2].contains("32s"));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let (mut panel, state) = setup();
        let (input_tx, input_rx) = unbounded();
        let (render_tx, _render_rx) = unbounded();
        input_tx
            .send(InputEvent::Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            })
            .unwrap();
        run_panel(&mut panel, &input_rx, &render_tx, &state);
        assert!(state.is_shutdown());
    }

    #[test]
    fn test_resize_is_forwarded() {
        let (mut panel, state) = setup();
        let (input_tx, input_rx) = unbounded();
        let (render_tx, render_rx) = unbounded();
        input_tx
            .send(InputEvent::Resize {
                width: 100,
                height: 30,
            })
            .unwrap();
        drop(input_tx);
        run_panel(&mut panel, &input_rx, &render_tx, &state);

        assert!(render_rx
            .try_iter()
            .any(|command| matches!(command, RenderCommand::Resize { width: 100, height: 30 })));
        // Disconnected input ends the loop
        assert!(state.is_shutdown());
    }

    #[test]
    fn test_stop_input_with_full_channel_returns() {
        let (input_tx, input_rx) = bounded::<InputEvent>(1);
        input_tx.send(InputEvent::Error("backlog".into())).unwrap();
        let input = InputActor::spawn(input_tx, Duration::from_millis(5)).unwrap();
        thread::sleep(Duration::from_millis(30));

        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            stop_input(input, input_rx);
            let _ = done_tx.send(());
        });
        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_shutdown_from_elsewhere_ends_panel() {
        let (mut panel, state) = setup();
        let (_input_tx, input_rx) = unbounded::<InputEvent>();
        let (render_tx, _render_rx) = unbounded();

        let stopper = {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                state.request_shutdown();
            })
        };
        run_panel(&mut panel, &input_rx, &render_tx, &state);
        stopper.join().unwrap();
        assert_eq!(state.refresh_secs(), 30);
    }
}
