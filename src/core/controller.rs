//! Client controller: validation, request sequencing and view updates

use crate::core::clipboard::Clipboard;
use crate::core::session::{SessionState, UiFlag};
use crate::core::video_info::{
    DownloadAvailability, DownloadRequest, DownloadTicket, Resolution, VideoSummary,
};
use crate::core::view::{Cover, CoverSource, Toast, View};
use crate::error::VidgrabError;
use crate::platform::service::ResolutionService;
use crate::utils::url::{cover_needs_proxy, LinkValidator};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const MSG_EMPTY_LINK: &str = "Please enter a share link";
const MSG_UNSUPPORTED_LINK: &str = "Please enter a valid share link from a supported platform";
const MSG_PARSE_FAILED: &str = "Failed to resolve link";
const MSG_SERVER_ERROR: &str = "Server error";
const MSG_NETWORK_ERROR: &str = "Network error, please check your connection";
const MSG_NOT_RESOLVED: &str = "Please resolve a video first";
const MSG_NO_MEDIA_URL: &str = "No download link available";
const MSG_DOWNLOAD_FAILED: &str = "Download failed, please retry";
const MSG_NOTHING_TO_COPY: &str = "Nothing to copy";
const MSG_COPIED: &str = "Video info copied to clipboard";
const MSG_NOTHING_TO_CLEAN: &str = "No file to clean up";
const MSG_CLEANED: &str = "File cleaned up";
const MSG_CLEANUP_FAILED: &str = "Cleanup failed";

/// Result of an operation that may be overtaken by a newer one
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The response was applied
    Completed(T),
    /// A newer request of the same kind was issued meanwhile; the response was dropped
    Superseded,
}

impl<T> Outcome<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            Outcome::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Outcome::Superseded)
    }
}

/// Mediates between user input, the resolution service and a view.
///
/// Operations take `&self` and may overlap. Each parse and download takes a
/// ticket from its own sequence; only the response to the latest ticket is
/// applied.
pub struct ClientController<S, V, C> {
    service: S,
    view: V,
    clipboard: C,
    validator: LinkValidator,
    state: Mutex<SessionState>,
    parse_seq: AtomicU64,
    download_seq: AtomicU64,
}

impl<S, V, C> ClientController<S, V, C>
where
    S: ResolutionService,
    V: View,
    C: Clipboard,
{
    /// Create a controller with the built-in platform allowlist
    pub fn new(service: S, view: V, clipboard: C) -> Self {
        Self {
            service,
            view,
            clipboard,
            validator: LinkValidator::new(),
            state: Mutex::new(SessionState::new()),
            parse_seq: AtomicU64::new(0),
            download_seq: AtomicU64::new(0),
        }
    }

    /// Replace the link allowlist
    pub fn with_validator(mut self, validator: LinkValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Validate a share link and resolve it
    pub async fn submit_link(&self, raw_input: &str) -> Result<Outcome<Resolution>, VidgrabError> {
        let link = match self.validator.validate(raw_input) {
            Ok(link) => link.to_string(),
            Err(e) => {
                let message = match &e {
                    VidgrabError::EmptyInput => MSG_EMPTY_LINK,
                    _ => MSG_UNSUPPORTED_LINK,
                };
                debug!("Rejected input {:?}: {}", raw_input, e);
                let mut state = self.state.lock().await;
                self.show_error(&mut state, message);
                return Err(e);
            }
        };

        let ticket = self.parse_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            self.set_flag(&mut state, UiFlag::Loading, true);
            self.set_flag(&mut state, UiFlag::Error, false);
            self.set_flag(&mut state, UiFlag::VideoPanel, false);
        }

        info!("Resolving {} (request #{})", link, ticket);
        let result = self.service.parse(&link).await;

        let mut state = self.state.lock().await;
        if ticket != self.parse_seq.load(Ordering::SeqCst) {
            debug!("Dropping stale parse response #{}", ticket);
            return Ok(Outcome::Superseded);
        }

        let outcome = match result {
            Ok(resolution) => {
                state.record_resolution(resolution.clone(), &link);
                let summary = VideoSummary::from_video(&resolution.video_info);
                self.view.render_video(&resolution.video_info, &summary);
                self.set_flag(&mut state, UiFlag::VideoPanel, true);
                info!("Resolved {} on {}", link, resolution.platform);
                Ok(Outcome::Completed(resolution))
            }
            Err(e) => {
                warn!("Resolving {} failed: {}", link, e);
                let fallback = match &e {
                    VidgrabError::Remote(_) => MSG_PARSE_FAILED,
                    VidgrabError::Status { .. } => MSG_SERVER_ERROR,
                    _ => MSG_NETWORK_ERROR,
                };
                self.show_error(&mut state, &e.user_message(fallback));
                Err(e)
            }
        };

        self.set_flag(&mut state, UiFlag::Loading, false);
        outcome
    }

    /// Ask the service to download the resolved video
    pub async fn request_download(&self) -> Result<Outcome<DownloadTicket>, VidgrabError> {
        let request = {
            let state = self.state.lock().await;
            let Some(resolution) = state.video() else {
                self.view.show_toast(&Toast::error(MSG_NOT_RESOLVED));
                return Err(VidgrabError::NotResolved);
            };

            let video = &resolution.video_info;
            let video_url = match (video.availability(), video.video_url.as_deref()) {
                (DownloadAvailability::Unavailable, _) | (_, None) => {
                    self.view.show_toast(&Toast::error(MSG_NO_MEDIA_URL));
                    return Err(VidgrabError::NoMediaUrl);
                }
                (_, Some(url)) => url.to_string(),
            };

            DownloadRequest {
                video_url,
                video_id: resolution.video_id.clone(),
                original_url: state.original_url().unwrap_or_default().to_string(),
                platform: state.platform().unwrap_or("unknown").to_string(),
            }
        };

        let ticket = self.download_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            self.set_flag(&mut state, UiFlag::DownloadProgress, true);
            self.set_flag(&mut state, UiFlag::VideoPanel, false);
        }

        info!("Requesting download #{} for {}", ticket, request.original_url);
        let result = self.service.download(&request).await;

        let mut state = self.state.lock().await;
        if ticket != self.download_seq.load(Ordering::SeqCst) {
            debug!("Dropping stale download response #{}", ticket);
            return Ok(Outcome::Superseded);
        }

        let outcome = match result {
            Ok(download) => match state.record_download(download.clone()) {
                Ok(()) => {
                    self.view.set_download_link(&download.download_url);
                    self.set_flag(&mut state, UiFlag::DownloadComplete, true);
                    info!("Download ready: {}", download.filename);
                    Ok(Outcome::Completed(download))
                }
                Err(e) => {
                    self.view.show_toast(&Toast::error(MSG_NOT_RESOLVED));
                    Err(e)
                }
            },
            Err(e) => {
                warn!("Download failed: {}", e);
                self.view
                    .show_toast(&Toast::error(e.user_message(MSG_DOWNLOAD_FAILED)));
                self.set_flag(&mut state, UiFlag::VideoPanel, true);
                Err(e)
            }
        };

        self.set_flag(&mut state, UiFlag::DownloadProgress, false);
        outcome
    }

    /// Copy a plain-text summary of the resolved video to the clipboard.
    ///
    /// Returns the copied text.
    pub async fn copy_info(&self) -> Result<String, VidgrabError> {
        let text = {
            let state = self.state.lock().await;
            let Some(resolution) = state.video() else {
                self.view.show_toast(&Toast::error(MSG_NOTHING_TO_COPY));
                return Err(VidgrabError::NotResolved);
            };
            VideoSummary::from_video(&resolution.video_info).to_clipboard_text(state.original_url())
        };

        if let Err(e) = self.clipboard.write_text(&text) {
            warn!("Clipboard write failed, using legacy copy: {}", e);
            if let Err(e) = self.clipboard.legacy_copy(&text) {
                warn!("Legacy copy failed: {}", e);
            }
        }

        self.view.show_toast(&Toast::success(MSG_COPIED));
        Ok(text)
    }

    /// Delete the server-side copy of the downloaded file
    pub async fn cleanup(&self) -> Result<(), VidgrabError> {
        let filename = {
            let state = self.state.lock().await;
            match state.filename() {
                Some(filename) => filename.to_string(),
                None => {
                    self.view.show_toast(&Toast::error(MSG_NOTHING_TO_CLEAN));
                    return Err(VidgrabError::NothingToCleanUp);
                }
            }
        };

        match self.service.cleanup(&filename).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if state.filename() == Some(filename.as_str()) {
                    state.clear_download();
                    self.set_flag(&mut state, UiFlag::DownloadComplete, false);
                }
                self.view.show_toast(&Toast::success(MSG_CLEANED));
                info!("Cleaned up {}", filename);
                Ok(())
            }
            Err(e) => {
                warn!("Cleanup of {} failed: {}", filename, e);
                self.view
                    .show_toast(&Toast::error(e.user_message(MSG_CLEANUP_FAILED)));
                Err(e)
            }
        }
    }

    /// Load the cover image: direct, then through the image proxy, then the placeholder
    pub async fn load_cover(&self) -> Result<Cover, VidgrabError> {
        let cover_url = {
            let state = self.state.lock().await;
            let Some(resolution) = state.video() else {
                return Err(VidgrabError::NotResolved);
            };
            resolution
                .video_info
                .cover_url
                .clone()
                .filter(|url| !url.trim().is_empty())
        };

        let cover = match cover_url {
            None => Cover::placeholder(),
            Some(url) => self.fetch_cover(url).await,
        };

        self.view.render_cover(&cover);
        Ok(cover)
    }

    async fn fetch_cover(&self, url: String) -> Cover {
        if !cover_needs_proxy(&url) {
            match self.service.fetch_image(&url).await {
                Ok(bytes) => {
                    return Cover {
                        source: CoverSource::Direct(url),
                        bytes,
                    }
                }
                Err(e) => debug!("Direct cover fetch failed, trying proxy: {}", e),
            }
        }

        match self.service.proxy_image(&url).await {
            Ok(bytes) => Cover {
                source: CoverSource::Proxied(url),
                bytes,
            },
            Err(e) => {
                warn!("Cover unavailable, using placeholder: {}", e);
                Cover::placeholder()
            }
        }
    }

    /// Return to the initial state with every panel hidden.
    ///
    /// Requests still in flight come back [`Outcome::Superseded`].
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        self.parse_seq.fetch_add(1, Ordering::SeqCst);
        self.download_seq.fetch_add(1, Ordering::SeqCst);
        state.reset();
        for flag in UiFlag::all() {
            self.view.set_flag(flag, false);
        }
    }

    fn set_flag(&self, state: &mut SessionState, flag: UiFlag, visible: bool) {
        state.flags.set(flag, visible);
        self.view.set_flag(flag, visible);
    }

    fn show_error(&self, state: &mut SessionState, message: &str) {
        self.view.show_error(message);
        self.set_flag(state, UiFlag::Error, true);
    }
}
