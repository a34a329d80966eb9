//! # vidgrab
//!
//! Client for a share-link video resolution service.
//!
//! A share link from a video platform is validated against an allowlist,
//! resolved by the service into metadata and a media URL, downloaded
//! server-side and finally cleaned up. [`ClientController`] owns that flow
//! and reports every state change to a [`View`], so the same logic drives
//! the terminal front end and the tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vidgrab::cli::{TerminalClipboard, TerminalView};
//! use vidgrab::cli::args::VerbosityLevel;
//! use vidgrab::{ClientController, HttpResolutionService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = HttpResolutionService::new()?;
//!     let view = TerminalView::new(VerbosityLevel::Normal, "http://127.0.0.1:4000");
//!     let controller = ClientController::new(service, view, TerminalClipboard::new());
//!
//!     controller.submit_link("https://vm.tiktok.com/ABC123").await?;
//!     controller.request_download().await?;
//!     controller.cleanup().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod platform;
pub mod utils;

// Re-export main types
pub use crate::core::{
    ClientController, Clipboard, Outcome, ResolvedVideo, Resolution, SessionState, Toast, UiFlag,
    View,
};
pub use error::VidgrabError;
pub use platform::{HttpClientConfig, HttpResolutionService, ResolutionService};
pub use utils::{format_count, format_duration, LinkValidator};

/// Result type alias for vidgrab operations
pub type Result<T> = std::result::Result<T, VidgrabError>;
