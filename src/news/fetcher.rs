//! News fetcher: background thread that keeps the headline fresh.
//!
//! Each cycle performs one blocking fetch without holding any lock, then
//! publishes the result in a single write. It then sleeps for the refresh
//! interval read at the start of the sleep, waking early on shutdown.

use super::HeadlineSource;
use crate::config::NewsConfig;
use crate::state::SharedState;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How often a sleeping fetcher checks for shutdown.
const SHUTDOWN_POLL: Duration = Duration::from_millis(50);

/// Fetch once and turn the outcome into ticker text.
///
/// Titles are joined with `separator`; any failure is logged and replaced
/// by `fallback`. Zero titles give an empty string.
pub fn headline_text(source: &dyn HeadlineSource, separator: &str, fallback: &str) -> String {
    match source.fetch_titles() {
        Ok(titles) => {
            info!(count = titles.len(), "news:headlines fetched");
            titles.join(separator)
        }
        Err(e) => {
            warn!(error = %e, "news:fetch failed, using fallback");
            fallback.to_string()
        }
    }
}

/// Handle to the fetcher thread.
pub struct NewsFetcher {
    /// Handle to the fetcher thread.
    handle: Option<JoinHandle<()>>,
    state: Arc<SharedState>,
}

impl NewsFetcher {
    /// Spawn the fetcher thread. The first fetch starts immediately.
    pub fn spawn<S>(source: S, state: Arc<SharedState>, news: &NewsConfig) -> io::Result<Self>
    where
        S: HeadlineSource + Send + 'static,
    {
        let separator = news.separator.clone();
        let fallback = news.fallback.clone();
        let thread_state = Arc::clone(&state);

        let handle = thread::Builder::new()
            .name("matrix-news".to_string())
            .spawn(move || {
                Self::run_loop(&source, &thread_state, &separator, &fallback);
            })?;

        Ok(Self {
            handle: Some(handle),
            state,
        })
    }

    /// Signal shutdown and wait up to `grace` for the thread to finish.
    ///
    /// A fetch stuck on the network cannot be interrupted; if the thread is
    /// still busy after `grace` it is left to die with the process.
    /// Returns `true` if the thread was joined.
    pub fn join(mut self, grace: Duration) -> bool {
        self.state.request_shutdown();
        let Some(handle) = self.handle.take() else {
            return true;
        };

        let deadline = Instant::now() + grace;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(SHUTDOWN_POLL.min(grace));
        }
        if handle.is_finished() {
            if handle.join().is_err() {
                warn!("news:fetcher thread panicked");
            }
            true
        } else {
            warn!("news:fetcher still busy at shutdown, detaching");
            false
        }
    }

    /// Main fetch loop.
    fn run_loop(source: &dyn HeadlineSource, state: &SharedState, separator: &str, fallback: &str) {
        while !state.is_shutdown() {
            let text = headline_text(source, separator, fallback);
            if state.is_shutdown() {
                break;
            }
            state.publish_headline(text);

            let interval = state.refresh_interval();
            debug!(interval_secs = interval.as_secs(), "news:sleeping");
            Self::sleep_unless_shutdown(state, interval);
        }
        debug!("news:fetcher stopped");
    }

    /// Sleep for `interval`, returning early once shutdown is requested.
    fn sleep_unless_shutdown(state: &SharedState, interval: Duration) {
        let deadline = Instant::now() + interval;
        loop {
            if state.is_shutdown() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            thread::sleep((deadline - now).min(SHUTDOWN_POLL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RefreshConfig;
    use crate::news::NewsError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(Vec<String>);

    impl HeadlineSource for Fixed {
        fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    impl HeadlineSource for Unreachable {
        fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
            Err(NewsError::Read(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    /// Returns a different batch each call and counts calls.
    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl HeadlineSource for Counting {
        fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![format!("headline {n}")])
        }
    }

    struct Exploding;

    impl HeadlineSource for Exploding {
        fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
            panic!("decoder blew up");
        }
    }

    /// Announces each call, then holds it until the test lets it finish.
    struct Gated {
        started: crossbeam_channel::Sender<usize>,
        release: crossbeam_channel::Receiver<()>,
        calls: AtomicUsize,
    }

    impl HeadlineSource for Gated {
        fn fetch_titles(&self) -> Result<Vec<String>, NewsError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let _ = self.started.send(n);
            self.release.recv().map_err(|_| {
                NewsError::Read(io::Error::new(io::ErrorKind::Interrupted, "gate closed"))
            })?;
            Ok(vec![format!("headline {n}")])
        }
    }

    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_headline_text_joins_titles() {
        let source = Fixed(vec!["One".into(), "Two".into(), "Three".into()]);
        assert_eq!(headline_text(&source, " || ", "fallback"), "One || Two || Three");
    }

    #[test]
    fn test_headline_text_zero_articles_is_empty() {
        assert_eq!(headline_text(&Fixed(Vec::new()), " || ", "fallback"), "");
    }

    #[test]
    fn test_headline_text_failure_uses_fallback() {
        assert_eq!(
            headline_text(&Unreachable, " || ", "Failed to fetch news."),
            "Failed to fetch news."
        );
    }

    #[test]
    fn test_fetcher_publishes_fallback_on_failure() {
        let state = Arc::new(SharedState::new("Loading AI news...", RefreshConfig::default()));
        let fetcher =
            NewsFetcher::spawn(Unreachable, Arc::clone(&state), &NewsConfig::default()).unwrap();

        assert!(wait_for(|| state.headline() == "Failed to fetch news."));
        assert!(fetcher.join(Duration::from_secs(2)));
        assert_eq!(state.headline(), "Failed to fetch news.");
    }

    #[test]
    fn test_fetcher_publishes_empty_for_zero_articles() {
        let state = Arc::new(SharedState::new("Loading AI news...", RefreshConfig::default()));
        let fetcher =
            NewsFetcher::spawn(Fixed(Vec::new()), Arc::clone(&state), &NewsConfig::default())
                .unwrap();

        assert!(wait_for(|| state.headline().is_empty()));
        assert!(fetcher.join(Duration::from_secs(2)));
    }

    #[test]
    fn test_fetcher_sleeps_between_fetches_and_stops_promptly() {
        let state = Arc::new(SharedState::new("", RefreshConfig::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Counting {
            calls: Arc::clone(&calls),
        };
        let fetcher = NewsFetcher::spawn(source, Arc::clone(&state), &NewsConfig::default()).unwrap();

        assert!(wait_for(|| state.headline() == "headline 0"));
        // Refresh interval is 30 s: no second fetch yet
        thread::sleep(Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let started = Instant::now();
        assert!(fetcher.join(Duration::from_secs(2)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_interval_change_applies_at_next_sleep() {
        let refresh = RefreshConfig {
            initial_secs: 60,
            min_secs: 1,
            max_secs: 120,
        };
        let state = Arc::new(SharedState::new("", refresh));
        let (started_tx, started_rx) = crossbeam_channel::unbounded();
        let (release_tx, release_rx) = crossbeam_channel::unbounded();
        let source = Gated {
            started: started_tx,
            release: release_rx,
            calls: AtomicUsize::new(0),
        };
        let fetcher = NewsFetcher::spawn(source, Arc::clone(&state), &NewsConfig::default()).unwrap();

        // Shorten the interval while the first fetch is in flight; the
        // sleep that follows it must use the new value, not 60 s.
        assert_eq!(started_rx.recv_timeout(Duration::from_secs(5)), Ok(0));
        state.set_refresh_secs(1);
        release_tx.send(()).unwrap();
        assert_eq!(started_rx.recv_timeout(Duration::from_secs(5)), Ok(1));
        assert!(wait_for(|| state.headline() == "headline 0"));

        // Lengthen it during the second fetch: no third fetch follows soon.
        state.set_refresh_secs(60);
        release_tx.send(()).unwrap();
        assert!(wait_for(|| state.headline() == "headline 1"));
        assert!(started_rx.recv_timeout(Duration::from_millis(1500)).is_err());

        assert!(fetcher.join(Duration::from_secs(2)));
    }

    #[test]
    fn test_join_survives_panicked_fetcher() {
        let state = Arc::new(SharedState::new("Loading AI news...", RefreshConfig::default()));
        let fetcher = NewsFetcher::spawn(Exploding, Arc::clone(&state), &NewsConfig::default()).unwrap();

        let handle_done = wait_for(|| fetcher.handle.as_ref().is_some_and(JoinHandle::is_finished));
        assert!(handle_done);
        assert!(fetcher.join(Duration::from_secs(1)));
        assert_eq!(state.headline(), "Loading AI news...");
    }

    #[test]
    fn test_sleep_returns_on_shutdown() {
        let state = SharedState::new("", RefreshConfig::default());
        state.request_shutdown();
        let started = Instant::now();
        NewsFetcher::sleep_unless_shutdown(&state, Duration::from_secs(60));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
