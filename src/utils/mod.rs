//! Utility functions for vidgrab

pub mod format;
pub mod url;

pub use self::format::*;
pub use self::url::*;
