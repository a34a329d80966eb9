//! Resolved video metadata and wire payloads

use crate::utils::format::{format_count, format_duration};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Video metadata returned by the resolution service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedVideo {
    /// Video title
    #[serde(default)]
    pub title: Option<String>,
    /// Author/channel name
    #[serde(default)]
    pub author: Option<String>,
    /// Like count
    #[serde(default, deserialize_with = "lenient_u64")]
    pub like_count: Option<u64>,
    /// Comment count
    #[serde(default, deserialize_with = "lenient_u64")]
    pub comment_count: Option<u64>,
    /// Share count
    #[serde(default, deserialize_with = "lenient_u64")]
    pub share_count: Option<u64>,
    /// View count (some platforms report this instead of shares)
    #[serde(default, deserialize_with = "lenient_u64")]
    pub view_count: Option<u64>,
    /// Duration in seconds
    #[serde(default, deserialize_with = "lenient_u64")]
    pub duration: Option<u64>,
    /// Cover image URL
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Direct media URL
    #[serde(default)]
    pub video_url: Option<String>,
    /// Free-form note from the service
    #[serde(default)]
    pub note: Option<String>,
    /// Manual download alternatives offered when no media URL is available
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
}

/// A manual download alternative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// CDN hosts that serve watermark-free media
const WATERMARKLESS_HOSTS: &[&str] = &["tiktokcdn.com", "ttwstatic.com", "tiktokv.com"];

/// Whether a resolved video can be downloaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadAvailability {
    /// Direct link to a watermark-free CDN copy
    Watermarkless,
    /// Some other direct link
    Available,
    /// No usable media URL
    Unavailable,
}

impl DownloadAvailability {
    /// Check if the download control should be enabled
    pub fn is_enabled(&self) -> bool {
        !matches!(self, DownloadAvailability::Unavailable)
    }
}

impl ResolvedVideo {
    /// Classify the media URL
    pub fn availability(&self) -> DownloadAvailability {
        match self.video_url.as_deref().map(str::trim) {
            Some(url) if WATERMARKLESS_HOSTS.iter().any(|host| url.contains(host)) => {
                DownloadAvailability::Watermarkless
            }
            Some(url) if !url.is_empty() && !url.contains("example.com") => {
                DownloadAvailability::Available
            }
            _ => DownloadAvailability::Unavailable,
        }
    }

    /// Share count, falling back to the view count
    pub fn shares_or_views(&self) -> Option<u64> {
        self.share_count.filter(|n| *n > 0).or(self.view_count)
    }
}

/// Successful parse payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved metadata
    pub video_info: ResolvedVideo,
    /// Platform key reported by the service
    #[serde(default = "unknown_platform")]
    pub platform: String,
    /// Human-readable platform name
    #[serde(default)]
    pub platform_name: Option<String>,
    /// Platform video ID
    #[serde(default)]
    pub video_id: Option<String>,
}

fn unknown_platform() -> String {
    "unknown".to_string()
}

/// Body of a download request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadRequest {
    pub video_url: String,
    pub video_id: Option<String>,
    pub original_url: String,
    pub platform: String,
}

/// Successful download payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownloadTicket {
    /// Server-side file name, used for cleanup
    pub filename: String,
    /// Link the finished file can be fetched from
    pub download_url: String,
}

/// A platform advertised by the service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlatformEntry {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Display strings for a resolved video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSummary {
    pub title: String,
    pub author: String,
    pub likes: String,
    pub comments: String,
    pub shares: String,
    pub duration: String,
    pub availability: DownloadAvailability,
}

impl VideoSummary {
    /// Build the display strings for `video`
    pub fn from_video(video: &ResolvedVideo) -> Self {
        Self {
            title: non_blank(video.title.as_deref()).unwrap_or("Untitled").to_string(),
            author: non_blank(video.author.as_deref())
                .unwrap_or("Unknown author")
                .to_string(),
            likes: format_count(video.like_count),
            comments: format_count(video.comment_count),
            shares: format_count(video.shares_or_views()),
            duration: format_duration(video.duration),
            availability: video.availability(),
        }
    }

    /// Plain-text summary suitable for the clipboard
    pub fn to_clipboard_text(&self, source: Option<&str>) -> String {
        let mut text = format!(
            "Title: {}\nAuthor: {}\nLikes: {}\nComments: {}\nShares: {}\nDuration: {}",
            self.title, self.author, self.likes, self.comments, self.shares, self.duration
        );
        if let Some(source) = source {
            text.push_str(&format!("\nSource: {}", source));
        }
        text
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept integers, floats and numeric strings; anything else reads as absent
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| *f >= 0.0).map(|f| f as u64),
        _ => None,
    }))
}
