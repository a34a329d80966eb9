//! Clipboard seam

use crate::error::VidgrabError;

/// Text clipboard with a legacy fallback path
pub trait Clipboard: Send + Sync {
    /// Write through the platform clipboard API
    fn write_text(&self, text: &str) -> Result<(), VidgrabError>;

    /// Older copy mechanism, used when `write_text` fails
    fn legacy_copy(&self, text: &str) -> Result<(), VidgrabError>;
}
