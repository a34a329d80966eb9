//! HTTP client for the resolution service

use crate::core::video_info::{DownloadRequest, DownloadTicket, PlatformEntry, Resolution};
use crate::error::VidgrabError;
use crate::platform::service::ResolutionService;
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

/// Default backend address
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:4000";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the resolution service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: Option<String>,
    /// Proxy URL
    pub proxy_url: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVER.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: None,
            proxy_url: None,
        }
    }
}

/// Resolution service reached over HTTP with JSON bodies
pub struct HttpResolutionService {
    client: Client,
    base_url: Url,
}

impl HttpResolutionService {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, VidgrabError> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self, VidgrabError> {
        let mut builder = ClientBuilder::new()
            .timeout(config.timeout)
            .gzip(true)
            .brotli(true);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        } else {
            builder = builder.user_agent(concat!("vidgrab/", env!("CARGO_PKG_VERSION")));
        }

        if let Some(proxy_url) = &config.proxy_url {
            debug!("Routing requests through {}", proxy_url);
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let client = builder.build()?;
        let mut base_url = Url::parse(&config.base_url)?;
        // Endpoints join relative to the base, so a mount prefix needs the trailing slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a link handed out by the service (root-relative or absolute)
    /// against the base URL
    pub fn resolve(&self, path: &str) -> Result<Url, VidgrabError> {
        Ok(self.base_url.join(path)?)
    }

    /// URL of an API endpoint such as `api/parse`, kept under any path
    /// prefix of the base URL
    pub fn endpoint(&self, name: &str) -> Result<Url, VidgrabError> {
        Ok(self.base_url.join(name.trim_start_matches('/'))?)
    }

    /// URL of the image proxy for `image_url`
    pub fn proxy_image_url(&self, image_url: &str) -> Result<Url, VidgrabError> {
        let mut url = self.endpoint("api/proxy-image")?;
        url.query_pairs_mut().append_pair("url", image_url);
        Ok(url)
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T, VidgrabError> {
        let url = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!("{} answered {} ({} bytes)", path, status, text.len());

        decode_envelope(status, &text)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, VidgrabError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VidgrabError::Status {
                status: status.as_u16(),
                message: None,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Save a finished download to `output_path`.
    ///
    /// Streams into a `.tmp` sibling and renames on success; the temp file is
    /// removed on failure. `on_progress` receives (bytes written, total size).
    pub async fn save_file(
        &self,
        download_url: &str,
        output_path: &Path,
        on_progress: impl Fn(u64, Option<u64>),
    ) -> Result<u64, VidgrabError> {
        let url = self.resolve(download_url)?;
        info!("Saving {} to {}", url, output_path.display());

        let tmp_path = output_path.with_extension("tmp");
        let mut file = File::create(&tmp_path).await?;

        match self.stream_into(url, &mut file, &on_progress).await {
            Ok(written) => {
                file.flush().await?;
                drop(file);
                tokio::fs::rename(&tmp_path, output_path).await?;
                info!("Saved {} bytes", written);
                Ok(written)
            }
            Err(e) => {
                warn!("Saving failed: {}, cleaning up temp file", e);
                drop(file);
                let _ = tokio::fs::remove_file(&tmp_path).await;
                Err(e)
            }
        }
    }

    async fn stream_into(
        &self,
        url: Url,
        file: &mut File,
        on_progress: &impl Fn(u64, Option<u64>),
    ) -> Result<u64, VidgrabError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| error_field(&body));
            return Err(VidgrabError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let total = response.content_length();
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            on_progress(written, total);
        }

        if written == 0 {
            return Err(VidgrabError::Generic("Empty download (0 bytes)".to_string()));
        }
        Ok(written)
    }
}

#[async_trait]
impl ResolutionService for HttpResolutionService {
    async fn parse(&self, url: &str) -> Result<Resolution, VidgrabError> {
        info!("Resolving {}", url);
        self.post_json("api/parse", json!({ "url": url })).await
    }

    async fn download(&self, request: &DownloadRequest) -> Result<DownloadTicket, VidgrabError> {
        info!("Requesting download of {}", request.original_url);
        self.post_json("api/download", serde_json::to_value(request)?)
            .await
    }

    async fn cleanup(&self, filename: &str) -> Result<(), VidgrabError> {
        info!("Cleaning up {}", filename);
        let _: Value = self
            .post_json("api/cleanup", json!({ "filename": filename }))
            .await?;
        Ok(())
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, VidgrabError> {
        debug!("Fetching cover {}", url);
        self.get_bytes(Url::parse(url)?).await
    }

    async fn proxy_image(&self, url: &str) -> Result<Vec<u8>, VidgrabError> {
        let proxied = self.proxy_image_url(url)?;
        debug!("Fetching cover through proxy {}", proxied);
        self.get_bytes(proxied).await
    }

    async fn platforms(&self) -> Result<Vec<PlatformEntry>, VidgrabError> {
        #[derive(Deserialize)]
        struct PlatformList {
            platforms: Vec<PlatformEntry>,
        }

        let url = self.endpoint("api/platforms")?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(VidgrabError::Status {
                status: status.as_u16(),
                message: error_field(&text),
            });
        }
        let list: PlatformList = serde_json::from_str(&text)?;
        Ok(list.platforms)
    }
}

/// Decode a `{success, error, ...}` envelope.
///
/// Non-2xx statuses become [`VidgrabError::Status`] and `success:false`
/// becomes [`VidgrabError::Remote`], both carrying the body's `error` text
/// when there is one. The rest of the body is decoded into `T`.
pub fn decode_envelope<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, VidgrabError> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(VidgrabError::Status {
                status: status.as_u16(),
                message: None,
            })
        }
        Err(e) => return Err(e.into()),
    };

    let message = value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string);

    if !status.is_success() {
        return Err(VidgrabError::Status {
            status: status.as_u16(),
            message,
        });
    }

    if !value.get("success").and_then(Value::as_bool).unwrap_or(false) {
        return Err(VidgrabError::Remote(message));
    }

    Ok(serde_json::from_value(value)?)
}

fn error_field(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}
