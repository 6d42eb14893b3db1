//! Crate-level error type.

use crate::capture::CaptureError;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors that stop the program.
///
/// News failures never appear here: the fetcher replaces them with
/// fallback text.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The frame source could not be opened.
    #[error("capture failed: {0}")]
    Capture(#[from] CaptureError),
    /// Terminal setup, output or thread spawn failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A worker thread panicked.
    #[error("{0} thread panicked")]
    ThreadPanic(&'static str),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
