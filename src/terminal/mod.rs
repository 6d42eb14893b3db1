//! Terminal setup and teardown.

mod session;

pub use session::TerminalSession;
