//! Configuration for the whole pipeline.
//!
//! Every tunable constant lives here and is handed to the components at
//! startup. [`MatrixConfig::default`] reproduces the classic look: a
//! 120x40 green grid, two ticker rows and an 80% phosphor trail.

use crate::buffer::Rgb;
use std::time::Duration;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The grid has no cells.
    #[error("grid must be at least 1x1, got {columns}x{rows}")]
    EmptyGrid {
        /// Configured columns.
        columns: u16,
        /// Configured rows.
        rows: u16,
    },
    /// The ticker would leave no room for the picture.
    #[error("ticker rows ({ticker_rows}) must be fewer than grid rows ({rows})")]
    TickerTooTall {
        /// Configured ticker rows.
        ticker_rows: u16,
        /// Configured grid rows.
        rows: u16,
    },
    /// The character ramp is empty.
    #[error("character ramp must contain at least one character")]
    EmptyRamp,
    /// A factor that must lie in `[0, 1]` does not.
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange {
        /// Name of the field.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A value that must be non-negative and finite is not.
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative {
        /// Name of the field.
        name: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// The cell width used for ticker scrolling is zero.
    #[error("character cell width must be non-zero")]
    ZeroCellWidth,
    /// The refresh interval range is inverted or starts at zero.
    #[error("refresh range [{min}, {max}] is invalid")]
    RefreshRange {
        /// Lower bound in seconds.
        min: u64,
        /// Upper bound in seconds.
        max: u64,
    },
}

/// Bounds and start value of the news refresh interval, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Interval in effect at startup.
    pub initial_secs: u64,
    /// Smallest value the control panel accepts.
    pub min_secs: u64,
    /// Largest value the control panel accepts.
    pub max_secs: u64,
}

impl RefreshConfig {
    /// Clamp `secs` into `[min_secs, max_secs]`.
    #[inline]
    pub const fn clamp(&self, secs: u64) -> u64 {
        if secs < self.min_secs {
            self.min_secs
        } else if secs > self.max_secs {
            self.max_secs
        } else {
            secs
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            initial_secs: 30,
            min_secs: 5,
            max_secs: 120,
        }
    }
}

/// Headline API request and presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsConfig {
    /// Endpoint without query string.
    pub endpoint: String,
    /// `category` query parameter.
    pub category: String,
    /// `q` query parameter.
    pub query: String,
    /// `language` query parameter.
    pub language: String,
    /// `apiKey` query parameter.
    pub api_key: Option<String>,
    /// Joins the titles into one ticker line.
    pub separator: String,
    /// Published when a fetch fails.
    pub fallback: String,
    /// Shown until the first fetch completes.
    pub loading_text: String,
    /// Whole-request timeout. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2/top-headlines".to_string(),
            category: "technology".to_string(),
            query: "AI".to_string(),
            language: "en".to_string(),
            api_key: None,
            separator: " || ".to_string(),
            fallback: "Failed to fetch news.".to_string(),
            loading_text: "Loading AI news...".to_string(),
            timeout: None,
        }
    }
}

/// Configuration for the renderer, compositor, ticker and fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixConfig {
    /// Grid width in characters.
    pub columns: u16,
    /// Grid height in characters, ticker rows included.
    pub rows: u16,
    /// Bottom rows reserved for the ticker.
    pub ticker_rows: u16,
    /// Width of one character cell in pixels. The ticker scrolls in pixels,
    /// so several frames pass before a glyph moves one column.
    pub char_width: u32,
    /// Characters from darkest to brightest.
    pub ramp: String,
    /// Ink of the ASCII picture.
    pub glyph_color: Rgb,
    /// Ink of the ticker's main line.
    pub ticker_color: Rgb,
    /// Ink of the ticker's shadow line.
    pub ticker_shadow_color: Rgb,
    /// Share of the previous buffer kept each frame.
    pub fade: f32,
    /// Brightness multiplier applied to every frame.
    pub base_brightness: f32,
    /// Extra brightness at startup, decaying toward zero.
    pub feedback_initial: f32,
    /// Amount the feedback boost loses per frame.
    pub feedback_step: f32,
    /// Upper bound on the feedback boost.
    pub feedback_max: f32,
    /// Ticker advance per frame, in pixels.
    pub scroll_step: u32,
    /// News refresh interval.
    pub refresh: RefreshConfig,
    /// Headline API.
    pub news: NewsConfig,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            columns: 120,
            rows: 40,
            ticker_rows: 2,
            char_width: 8,
            ramp: " .:-=+*#%@".to_string(),
            glyph_color: Rgb::GREEN,
            ticker_color: Rgb::new(50, 255, 50),
            ticker_shadow_color: Rgb::new(20, 200, 20),
            fade: 0.8,
            base_brightness: 0.7,
            feedback_initial: 0.0,
            feedback_step: 0.005,
            feedback_max: 1.0,
            scroll_step: 2,
            refresh: RefreshConfig::default(),
            news: NewsConfig::default(),
        }
    }
}

impl MatrixConfig {
    /// Rows available to the picture above the ticker.
    #[inline]
    pub const fn picture_rows(&self) -> u16 {
        self.rows.saturating_sub(self.ticker_rows)
    }

    /// Grid width in pixels.
    #[inline]
    pub const fn width_px(&self) -> u32 {
        self.columns as u32 * self.char_width
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.ticker_rows >= self.rows {
            return Err(ConfigError::TickerTooTall {
                ticker_rows: self.ticker_rows,
                rows: self.rows,
            });
        }
        if self.ramp.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        if !(0.0..=1.0).contains(&self.fade) {
            return Err(ConfigError::OutOfUnitRange {
                name: "fade",
                value: self.fade,
            });
        }
        for (name, value) in [
            ("base_brightness", self.base_brightness),
            ("feedback_initial", self.feedback_initial),
            ("feedback_step", self.feedback_step),
            ("feedback_max", self.feedback_max),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.char_width == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }
        let RefreshConfig { min_secs, max_secs, .. } = self.refresh;
        if min_secs == 0 || min_secs > max_secs {
            return Err(ConfigError::RefreshRange {
                min: min_secs,
                max: max_secs,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MatrixConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.picture_rows(), 38);
        assert_eq!(config.width_px(), 960);
    }

    #[test]
    fn test_refresh_clamp() {
        let refresh = RefreshConfig::default();
        assert_eq!(refresh.clamp(1), 5);
        assert_eq!(refresh.clamp(200), 120);
        assert_eq!(refresh.clamp(45), 45);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = MatrixConfig {
            ticker_rows: 40,
            ..MatrixConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::TickerTooTall { .. })));

        let config = MatrixConfig {
            ramp: String::new(),
            ..MatrixConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyRamp));

        let config = MatrixConfig {
            fade: 1.5,
            ..MatrixConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfUnitRange { name: "fade", .. })
        ));

        let config = MatrixConfig {
            base_brightness: -0.1,
            ..MatrixConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));

        let config = MatrixConfig {
            refresh: RefreshConfig {
                initial_secs: 30,
                min_secs: 60,
                max_secs: 10,
            },
            ..MatrixConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::RefreshRange { .. })));

        let config = MatrixConfig {
            columns: 0,
            ..MatrixConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }
}
