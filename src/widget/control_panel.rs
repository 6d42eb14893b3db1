//! Control Panel Widget: keyboard slider for the news refresh interval.
//!
//! One row: label, an ASCII gauge, the current value and the key hints.
//!
//! ```text
//! News refresh [=====|--------------]  30s  -/+ 1s  PgDn/PgUp 10s  Home/End  q quit
//! ```

use super::traits::Widget;
use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Cell, Rgb};
use crate::config::RefreshConfig;
use crate::layout::Rect;
use crate::state::SharedState;
use std::sync::Arc;
use tracing::info;

/// Width of the gauge between the brackets.
const GAUGE_WIDTH: u16 = 20;

/// Colors of the control panel.
#[derive(Debug, Clone)]
pub struct ControlPanelConfig {
    /// Background color.
    pub bg: Rgb,
    /// Label and gauge color.
    pub fg: Rgb,
    /// Value color.
    pub value_fg: Rgb,
    /// Key hint color.
    pub hint_fg: Rgb,
}

impl Default for ControlPanelConfig {
    fn default() -> Self {
        Self {
            bg: Rgb::new(0, 30, 0),
            fg: Rgb::new(0, 200, 0),
            value_fg: Rgb::new(50, 255, 50),
            hint_fg: Rgb::new(0, 120, 0),
        }
    }
}

/// Slider bound to the shared refresh interval.
#[derive(Debug)]
pub struct ControlPanel {
    /// Value shown, as last stored in the shared state.
    secs: u64,
    bounds: Rect,
    refresh: RefreshConfig,
    state: Arc<SharedState>,
    config: ControlPanelConfig,
    /// Needs redraw flag.
    dirty: bool,
}

impl ControlPanel {
    /// Create a panel showing the interval currently in `state`.
    pub fn new(bounds: Rect, state: Arc<SharedState>) -> Self {
        Self {
            secs: state.refresh_secs(),
            bounds,
            refresh: state.refresh_bounds(),
            state,
            config: ControlPanelConfig::default(),
            dirty: true,
        }
    }

    /// Current interval in seconds.
    pub const fn value(&self) -> u64 {
        self.secs
    }

    /// Store a new interval. Out-of-range values are clamped.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_value(&mut self, secs: u64) -> bool {
        let stored = self.state.set_refresh_secs(secs);
        if stored == self.secs {
            return false;
        }
        self.secs = stored;
        self.dirty = true;
        info!(interval_secs = stored, "panel:refresh interval changed");
        true
    }

    /// Position of the gauge's handle, `0..GAUGE_WIDTH`.
    fn handle_position(&self) -> u16 {
        let span = self.refresh.max_secs.saturating_sub(self.refresh.min_secs);
        if span == 0 {
            return 0;
        }
        let offset = self.secs.saturating_sub(self.refresh.min_secs);
        let position = offset * u64::from(GAUGE_WIDTH - 1) / span;
        u16::try_from(position).unwrap_or(GAUGE_WIDTH - 1)
    }

    fn gauge(&self) -> String {
        let handle = self.handle_position();
        let mut gauge = String::with_capacity(GAUGE_WIDTH as usize + 2);
        gauge.push('[');
        for i in 0..GAUGE_WIDTH {
            gauge.push(match i.cmp(&handle) {
                std::cmp::Ordering::Less => '=',
                std::cmp::Ordering::Equal => '|',
                std::cmp::Ordering::Greater => '-',
            });
        }
        gauge.push(']');
        gauge
    }
}

impl Widget for ControlPanel {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn render(&self, buffer: &mut Buffer) {
        let Rect { x, y, width, .. } = self.bounds;
        if self.bounds.is_empty() {
            return;
        }
        buffer.fill_rect(x, y, width, 1, Cell::EMPTY.with_bg(self.config.bg));

        let bg = self.config.bg;
        let sections = [
            ("News refresh ".to_string(), self.config.fg),
            (self.gauge(), self.config.fg),
            (format!(" {:>4}s ", self.secs), self.config.value_fg),
            (
                " -/+ 1s  PgDn/PgUp 10s  Home/End  q quit".to_string(),
                self.config.hint_fg,
            ),
        ];

        let right = self.bounds.right().min(buffer.width());
        let mut col = x;
        for (text, fg) in &sections {
            if col >= right {
                break;
            }
            let room = usize::from(right - col);
            let clipped: String = text.chars().take(room).collect();
            col += buffer.put_str(col, y, &clipped, *fg, bg);
        }
    }

    fn handle_input(&mut self, event: &InputEvent) -> bool {
        let InputEvent::Key { code, .. } = event else {
            return false;
        };
        let RefreshConfig {
            min_secs, max_secs, ..
        } = self.refresh;
        let target = match code {
            KeyCode::Left | KeyCode::Char('-') => self.secs.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('+') => self.secs.saturating_add(1),
            KeyCode::PageDown => self.secs.saturating_sub(10),
            KeyCode::PageUp => self.secs.saturating_add(10),
            KeyCode::Home => min_secs,
            KeyCode::End => max_secs,
            _ => return false,
        };
        self.set_value(target);
        true
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
