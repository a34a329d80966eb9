//! Terminal front end

pub mod args;
pub mod clipboard;
pub mod output;

pub use self::args::Args;
pub use self::clipboard::TerminalClipboard;
pub use self::output::TerminalView;
