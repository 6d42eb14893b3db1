//! `vision-matrix`: webcam ASCII art with a news ticker.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vision_matrix::{run, AppConfig, MatrixConfig, SourceSpec};

/// Where frames come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Source {
    /// A local camera (needs the `camera` feature).
    Camera,
    /// A generated moving pattern.
    Pattern,
}

impl Source {
    /// Camera when this build has one, otherwise the pattern.
    const DEFAULT: Self = if SourceSpec::CAMERA_AVAILABLE {
        Self::Camera
    } else {
        Self::Pattern
    };
}

/// Live camera feed as green ASCII art with a scrolling news ticker.
#[derive(Debug, Parser)]
#[command(name = "vision-matrix", version, about)]
struct Cli {
    /// Frame source. Defaults to the camera in builds with the `camera`
    /// feature and to the pattern otherwise.
    #[arg(long, value_enum, default_value_t = Source::DEFAULT)]
    source: Source,

    /// Camera index; 0 is the first camera.
    #[arg(long, default_value_t = 0)]
    camera_index: u32,

    /// Grid width in characters.
    #[arg(long, default_value_t = 120)]
    columns: u16,

    /// Grid height in characters, ticker included.
    #[arg(long, default_value_t = 40)]
    rows: u16,

    /// Share of the previous image kept each frame, 0 to 1.
    #[arg(long, default_value_t = 0.8)]
    fade: f32,

    /// Brightness multiplier.
    #[arg(long, default_value_t = 0.7)]
    brightness: f32,

    /// Initial news refresh interval in seconds (5 to 120).
    #[arg(long, default_value_t = 30)]
    refresh: u64,

    /// News API key.
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Headline search query.
    #[arg(long, default_value = "AI")]
    query: String,

    /// Headline category.
    #[arg(long, default_value = "technology")]
    category: String,

    /// Headline language.
    #[arg(long, default_value = "en")]
    language: String,

    /// Give up on a news request after this many seconds.
    #[arg(long)]
    http_timeout: Option<u64>,

    /// Stop after this many frames (pattern source only).
    #[arg(long)]
    frames: Option<u64>,

    /// Log file; the terminal itself is used for the picture.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        let mut matrix = MatrixConfig {
            columns: self.columns,
            rows: self.rows,
            fade: self.fade,
            base_brightness: self.brightness,
            ..MatrixConfig::default()
        };
        matrix.refresh.initial_secs = self.refresh;
        matrix.news.api_key.clone_from(&self.api_key);
        matrix.news.query.clone_from(&self.query);
        matrix.news.category.clone_from(&self.category);
        matrix.news.language.clone_from(&self.language);
        matrix.news.timeout = self.http_timeout.map(Duration::from_secs);

        // Pattern frames are sized to the grid at 8x12 pixels per cell.
        let source = match self.source {
            Source::Camera => SourceSpec::Camera {
                index: self.camera_index,
            },
            Source::Pattern => SourceSpec::Pattern {
                width: u32::from(self.columns) * matrix.char_width,
                height: u32::from(self.rows) * 12,
                fps: 30,
                limit: self.frames,
            },
        };

        AppConfig {
            matrix,
            source,
            ..AppConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("vision-matrix.log"));
    let _guard = init_logging(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    if cli.api_key.is_none() {
        warn!("no news API key; set NEWSAPI_KEY or pass --api-key");
    }
    info!(source = ?cli.source, columns = cli.columns, rows = cli.rows, "starting");

    let report = run(cli.app_config()).context("vision-matrix stopped with an error")?;

    // The terminal is restored by now.
    println!(
        "{} frames shown ({:?}); {} bytes written, {} us average render",
        report.display.frames,
        report.display.reason,
        report.render.bytes_written,
        report.render.avg_render_us,
    );
    if !report.fetcher_joined {
        println!("news request still in flight at exit; abandoned");
    }
    Ok(())
}

/// Log to `path` through a non-blocking writer. Keep the guard alive
/// until exit so buffered lines are flushed.
fn init_logging(
    path: &std::path::Path,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .init();

    Ok(guard)
}
