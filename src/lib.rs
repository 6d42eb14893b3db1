//! # Vision Matrix
//!
//! A live camera feed drawn as green ASCII art in the terminal, with a
//! phosphor-style fade trail and a scrolling news ticker.
//!
//! ## Core Concepts
//!
//! - **Persistent buffer**: each frame is blended into the previous image,
//!   so moving shapes leave fading trails
//! - **Ticker overlay**: headlines scroll across the bottom rows
//! - **Actor model**: isolated threads for capture, input, rendering and news
//! - **Diff rendering**: only changed cells are written to the terminal
//!
//! ## Example
//!
//! ```rust,ignore
//! use vision_matrix::{FrameRenderer, FadeCompositor, MatrixConfig, Buffer};
//!
//! let config = MatrixConfig::default();
//! let renderer = FrameRenderer::new(&config)?;
//! let compositor = FadeCompositor::new(config.fade);
//! let mut persistent = Buffer::new(config.columns, config.rows);
//!
//! let next = renderer.render(&frame, config.base_brightness);
//! compositor.composite(&mut persistent, &next);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod capture;
pub mod config;
pub mod error;
pub mod layout;
pub mod news;
pub mod render;
pub mod state;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use app::{run, AppConfig, AppReport};
pub use buffer::{Buffer, Cell, Modifiers, Rgb};
pub use capture::{CaptureError, FrameSource, SourceSpec};
pub use config::{ConfigError, MatrixConfig, NewsConfig, RefreshConfig};
pub use error::{Error, Result};
pub use layout::{Rect, ScreenLayout};
pub use render::{FadeCompositor, FeedbackIntensity, FrameRenderer, Ramp, TickerOverlay};
pub use state::SharedState;
