//! Widgets drawn around the ASCII grid.
//!
//! - [`Widget`]: the trait every component implements
//! - [`ControlPanel`]: the refresh interval slider under the grid

mod control_panel;
mod traits;

pub use control_panel::{ControlPanel, ControlPanelConfig};
pub use traits::Widget;
