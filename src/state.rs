//! State shared between the display loop, the news fetcher and the
//! control panel.

use crate::config::RefreshConfig;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Cross-thread state, handed to every activity behind an `Arc`.
///
/// The headline is the only value that needs a lock: it is replaced as a
/// whole, and readers take a copy. The refresh interval is a single integer
/// read with relaxed ordering; a reader may see the previous value for one
/// cycle.
#[derive(Debug)]
pub struct SharedState {
    headline: Mutex<String>,
    refresh_secs: AtomicU64,
    refresh_bounds: RefreshConfig,
    shutdown: AtomicBool,
}

impl SharedState {
    /// Create the state with an initial headline and refresh settings.
    pub fn new(initial_headline: impl Into<String>, refresh: RefreshConfig) -> Self {
        Self {
            headline: Mutex::new(initial_headline.into()),
            refresh_secs: AtomicU64::new(refresh.clamp(refresh.initial_secs)),
            refresh_bounds: refresh,
            shutdown: AtomicBool::new(false),
        }
    }

    /// Copy out the current headline.
    pub fn headline(&self) -> String {
        self.headline
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the headline.
    pub fn publish_headline(&self, text: String) {
        *self.headline.lock().unwrap_or_else(PoisonError::into_inner) = text;
    }

    /// Current refresh interval in seconds.
    #[inline]
    pub fn refresh_secs(&self) -> u64 {
        self.refresh_secs.load(Ordering::Relaxed)
    }

    /// Current refresh interval.
    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs())
    }

    /// Set the refresh interval, clamped into the configured range.
    ///
    /// Returns the value actually stored.
    pub fn set_refresh_secs(&self, secs: u64) -> u64 {
        let clamped = self.refresh_bounds.clamp(secs);
        self.refresh_secs.store(clamped, Ordering::Relaxed);
        clamped
    }

    /// The range the refresh interval is kept in.
    #[inline]
    pub const fn refresh_bounds(&self) -> RefreshConfig {
        self.refresh_bounds
    }

    /// Ask every activity to stop.
    #[inline]
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Whether shutdown has been requested.
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}
