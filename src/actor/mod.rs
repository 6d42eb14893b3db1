//! Actor Model: Message-passing concurrency for the matrix display.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards to the main loop
//! - **Display Loop**: Captures frames and sends the finished grid
//! - **Render Actor**: Composes grid and panel, diffs and flushes
//! - **Main Loop**: Runs the control panel and coordinates shutdown
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │  Main Loop   │
//! └──────────────┘                     │ (panel)      │
//!                                      └──────┬───────┘
//!                                             │ RenderCommand::Panel
//! ┌──────────────┐  RenderCommand::Frame      ▼
//! │Display Thread│ ─────────────────▶  ┌──────────────┐
//! └──────────────┘                     │Render Thread │
//!                                      └──────────────┘
//! ```
//!
//! The news fetcher and the display loop share state through
//! [`SharedState`](crate::state::SharedState) rather than messages.

mod display;
mod input;
mod messages;
mod renderer;

pub use display::{spawn_display, DisplayLoop, DisplayReport, LoopState, StopReason};
pub use input::InputActor;
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
pub use renderer::{RenderStats, RendererActor};
