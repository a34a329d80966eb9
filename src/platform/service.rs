//! Resolution service seam

use crate::core::video_info::{DownloadRequest, DownloadTicket, PlatformEntry, Resolution};
use crate::error::VidgrabError;
use async_trait::async_trait;

/// Remote service that resolves share links and hosts the downloaded files
#[async_trait]
pub trait ResolutionService: Send + Sync {
    /// Resolve a share link into metadata and a media URL
    async fn parse(&self, url: &str) -> Result<Resolution, VidgrabError>;

    /// Ask the service to fetch the media into a temporary file
    async fn download(&self, request: &DownloadRequest) -> Result<DownloadTicket, VidgrabError>;

    /// Delete a previously downloaded temporary file
    async fn cleanup(&self, filename: &str) -> Result<(), VidgrabError>;

    /// Fetch an image straight from its URL
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, VidgrabError>;

    /// Fetch an image through the service's image proxy
    async fn proxy_image(&self, url: &str) -> Result<Vec<u8>, VidgrabError>;

    /// Platforms the service supports
    async fn platforms(&self) -> Result<Vec<PlatformEntry>, VidgrabError>;
}
