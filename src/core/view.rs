//! Rendering seam between the controller and a front end

use crate::core::session::UiFlag;
use crate::core::video_info::{ResolvedVideo, VideoSummary};
use std::time::Duration;

/// How long a toast stays visible
pub const TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    /// The view dismisses the toast after this long
    pub lifetime: Duration,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            lifetime: TOAST_LIFETIME,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            lifetime: TOAST_LIFETIME,
        }
    }
}

/// Where a cover image ended up coming from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverSource {
    /// Fetched straight from the cover URL
    Direct(String),
    /// Fetched through the service's image proxy
    Proxied(String),
    /// Both steps failed, or there was no cover URL
    Placeholder,
}

/// Static placeholder shown when no cover could be loaded
pub const PLACEHOLDER_COVER: &[u8] = br##"<svg width="300" height="200" xmlns="http://www.w3.org/2000/svg"><rect width="100%" height="100%" fill="#f8f9fa"/><text x="50%" y="50%" font-family="Arial, sans-serif" font-size="14" fill="#999" text-anchor="middle" dy=".3em">No cover</text></svg>"##;

/// A loaded cover image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub source: CoverSource,
    pub bytes: Vec<u8>,
}

impl Cover {
    pub fn placeholder() -> Self {
        Self {
            source: CoverSource::Placeholder,
            bytes: PLACEHOLDER_COVER.to_vec(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.source == CoverSource::Placeholder
    }
}

/// Everything the controller needs from a rendering environment
pub trait View: Send + Sync {
    /// Show or hide one panel/indicator
    fn set_flag(&self, flag: UiFlag, visible: bool);

    /// Render freshly resolved metadata
    fn render_video(&self, video: &ResolvedVideo, summary: &VideoSummary);

    /// Render the cover image once it has been loaded
    fn render_cover(&self, cover: &Cover);

    /// Inline error message (parse stage)
    fn show_error(&self, message: &str);

    /// Transient notice (all other stages)
    fn show_toast(&self, toast: &Toast);

    /// Point the completion link at the finished file
    fn set_download_link(&self, url: &str);
}
