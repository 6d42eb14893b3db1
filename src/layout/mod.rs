//! Layout module: Fixed screen regions.
//!
//! The screen layout is computed once from the configuration: the ASCII
//! grid on top, the control panel row directly beneath it.

mod rect;
mod screen;

pub use rect::Rect;
pub use screen::ScreenLayout;
