//! Command line argument parsing

use crate::platform::client::{HttpClientConfig, DEFAULT_SERVER};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// vidgrab - resolve and download videos from share links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Share link (or share text containing one)
    pub link: Option<String>,

    /// Resolution service base URL
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Proxy URL (http/https/socks)
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Request a download after resolving
    #[arg(short, long)]
    pub download: bool,

    /// Save the finished file locally (implies --download)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Delete the server copy after downloading
    #[arg(long)]
    pub cleanup: bool,

    /// Copy the video summary to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Write the cover image to PATH
    #[arg(long, value_name = "PATH")]
    pub save_cover: Option<PathBuf>,

    /// Print resolved media URL and exit (no download)
    #[arg(short = 'g', long)]
    pub print_url: bool,

    /// List the platforms the service supports and exit
    #[arg(long)]
    pub list_platforms: bool,

    /// Extra allowlist pattern (regex), may be repeated
    #[arg(long, value_name = "REGEX")]
    pub allow: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Check if a download should be requested
    pub fn wants_download(&self) -> bool {
        self.download || self.output.is_some() || self.cleanup
    }

    /// HTTP client configuration from the flags
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.server.clone(),
            timeout: self.timeout_duration(),
            user_agent: self.user_agent.clone(),
            proxy_url: self.proxy.clone(),
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            link: None,
            server: DEFAULT_SERVER.to_string(),
            timeout: humantime::Duration::from(Duration::from_secs(30)),
            user_agent: None,
            proxy: None,
            download: false,
            output: None,
            cleanup: false,
            copy: false,
            save_cover: None,
            print_url: false,
            list_platforms: false,
            allow: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["vidgrab", "https://vm.tiktok.com/ABC123"]).unwrap();
        assert_eq!(args.link.as_deref(), Some("https://vm.tiktok.com/ABC123"));
        assert_eq!(args.server, DEFAULT_SERVER);
        assert_eq!(args.timeout_duration(), Duration::from_secs(30));
        assert!(!args.wants_download());
    }

    #[test]
    fn test_parse_full() {
        let args = Args::try_parse_from([
            "vidgrab",
            "--server",
            "http://backend:5000",
            "--timeout",
            "1m",
            "-o",
            "/tmp/video.mp4",
            "--cleanup",
            "--copy",
            "--allow",
            r"vimeo\.com",
            "--allow",
            r"dailymotion\.com",
            "https://vimeo.com/1",
        ])
        .unwrap();

        assert_eq!(args.server, "http://backend:5000");
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
        assert_eq!(args.output, Some(PathBuf::from("/tmp/video.mp4")));
        assert!(args.wants_download());
        assert!(args.copy);
        assert_eq!(args.allow.len(), 2);
    }

    #[test]
    fn test_list_platforms_without_link() {
        let args = Args::try_parse_from(["vidgrab", "--list-platforms"]).unwrap();
        assert!(args.list_platforms);
        assert_eq!(args.link, None);
    }

    #[test]
    fn test_http_config() {
        let args = Args {
            server: "http://localhost:8080".to_string(),
            proxy: Some("socks5://127.0.0.1:1080".to_string()),
            ..Default::default()
        };
        let config = args.http_config();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.proxy_url.as_deref(), Some("socks5://127.0.0.1:1080"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_args_verbosity_level() {
        assert_eq!(Args::default().verbosity_level(), VerbosityLevel::Normal);

        let args = Args {
            quiet: true,
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);

        let args = Args {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(args.verbosity_level(), VerbosityLevel::Verbose);
    }
}
