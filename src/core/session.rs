//! Session state and UI visibility flags

use crate::core::video_info::{DownloadTicket, Resolution};
use crate::error::VidgrabError;

/// Independent visibility flags of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiFlag {
    Loading,
    Error,
    VideoPanel,
    DownloadProgress,
    DownloadComplete,
}

impl UiFlag {
    /// All flags, in display order
    pub fn all() -> [UiFlag; 5] {
        [
            UiFlag::Loading,
            UiFlag::Error,
            UiFlag::VideoPanel,
            UiFlag::DownloadProgress,
            UiFlag::DownloadComplete,
        ]
    }
}

/// Current value of every [`UiFlag`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiFlags {
    pub loading: bool,
    pub error: bool,
    pub video_panel: bool,
    pub download_progress: bool,
    pub download_complete: bool,
}

impl UiFlags {
    pub fn get(&self, flag: UiFlag) -> bool {
        match flag {
            UiFlag::Loading => self.loading,
            UiFlag::Error => self.error,
            UiFlag::VideoPanel => self.video_panel,
            UiFlag::DownloadProgress => self.download_progress,
            UiFlag::DownloadComplete => self.download_complete,
        }
    }

    pub fn set(&mut self, flag: UiFlag, visible: bool) {
        let slot = match flag {
            UiFlag::Loading => &mut self.loading,
            UiFlag::Error => &mut self.error,
            UiFlag::VideoPanel => &mut self.video_panel,
            UiFlag::DownloadProgress => &mut self.download_progress,
            UiFlag::DownloadComplete => &mut self.download_complete,
        };
        *slot = visible;
    }
}

/// Transient state of one controller session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    video: Option<Resolution>,
    original_url: Option<String>,
    platform: Option<String>,
    filename: Option<String>,
    download_url: Option<String>,
    /// Visibility flags as last pushed to the view
    pub flags: UiFlags,
}

impl SessionState {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a successful parse. Replaces any previous resolution wholesale.
    pub fn record_resolution(&mut self, resolution: Resolution, original_url: &str) {
        self.platform = Some(resolution.platform.clone());
        self.original_url = Some(original_url.to_string());
        self.video = Some(resolution);
    }

    /// Store a successful download.
    ///
    /// Fails when nothing has been resolved yet.
    pub fn record_download(&mut self, ticket: DownloadTicket) -> Result<(), VidgrabError> {
        if self.video.is_none() {
            return Err(VidgrabError::NotResolved);
        }
        self.filename = Some(ticket.filename);
        self.download_url = Some(ticket.download_url);
        Ok(())
    }

    /// Forget the downloaded file
    pub fn clear_download(&mut self) {
        self.filename = None;
        self.download_url = None;
    }

    /// Drop everything, flags included
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn video(&self) -> Option<&Resolution> {
        self.video.as_ref()
    }

    pub fn original_url(&self) -> Option<&str> {
        self.original_url.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::video_info::ResolvedVideo;

    fn resolution(platform: &str) -> Resolution {
        Resolution {
            video_info: ResolvedVideo {
                title: Some("T".to_string()),
                ..Default::default()
            },
            platform: platform.to_string(),
            platform_name: None,
            video_id: Some("123".to_string()),
        }
    }

    fn ticket() -> DownloadTicket {
        DownloadTicket {
            filename: "tiktok_123.mp4".to_string(),
            download_url: "/download/tiktok_123.mp4".to_string(),
        }
    }

    #[test]
    fn test_flags_roundtrip_each_flag() {
        let mut flags = UiFlags::default();
        for flag in UiFlag::all() {
            assert!(!flags.get(flag));
            flags.set(flag, true);
            assert!(flags.get(flag));
        }
        flags.set(UiFlag::Error, false);
        assert!(!flags.error);
        assert!(flags.loading && flags.video_panel);
    }

    #[test]
    fn test_download_requires_resolution() {
        let mut state = SessionState::new();
        assert!(matches!(
            state.record_download(ticket()),
            Err(VidgrabError::NotResolved)
        ));
        assert_eq!(state.filename(), None);
    }

    #[test]
    fn test_resolution_then_download_then_clear() {
        let mut state = SessionState::new();
        state.record_resolution(resolution("tiktok"), "https://vm.tiktok.com/ABC123");
        assert_eq!(state.platform(), Some("tiktok"));
        assert_eq!(state.original_url(), Some("https://vm.tiktok.com/ABC123"));

        state.record_download(ticket()).unwrap();
        assert_eq!(state.filename(), Some("tiktok_123.mp4"));
        assert_eq!(state.download_url(), Some("/download/tiktok_123.mp4"));

        state.clear_download();
        assert_eq!(state.filename(), None);
        assert!(state.video().is_some());
    }

    #[test]
    fn test_new_resolution_replaces_old() {
        let mut state = SessionState::new();
        state.record_resolution(resolution("tiktok"), "https://vm.tiktok.com/A");
        state.record_resolution(resolution("youtube"), "https://youtu.be/B");
        assert_eq!(state.platform(), Some("youtube"));
        assert_eq!(state.original_url(), Some("https://youtu.be/B"));
    }

    #[test]
    fn test_reset() {
        let mut state = SessionState::new();
        state.record_resolution(resolution("tiktok"), "https://vm.tiktok.com/A");
        state.record_download(ticket()).unwrap();
        state.flags.set(UiFlag::DownloadComplete, true);
        state.reset();
        assert_eq!(state, SessionState::new());
    }
}
