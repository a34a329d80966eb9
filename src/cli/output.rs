//! Terminal rendering of the controller's view

use crate::cli::args::VerbosityLevel;
use crate::core::session::UiFlag;
use crate::core::video_info::{DownloadAvailability, PlatformEntry, ResolvedVideo, VideoSummary};
use crate::core::view::{Cover, CoverSource, Toast, ToastKind, View};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const DEFAULT_UNAVAILABLE_HINT: &str =
    "The platform blocked automatic extraction; try one of the alternatives below.";

/// Renders the view to stdout/stderr
pub struct TerminalView {
    verbosity: VerbosityLevel,
    server: String,
    spinners: Mutex<HashMap<UiFlag, ProgressBar>>,
    transfer_bar: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    /// Create a new terminal view.
    ///
    /// `server` is shown next to relative download links.
    pub fn new(verbosity: VerbosityLevel, server: impl Into<String>) -> Self {
        Self {
            verbosity,
            server: server.into(),
            spinners: Mutex::new(HashMap::new()),
            transfer_bar: Mutex::new(None),
        }
    }

    fn spinner_message(flag: UiFlag) -> Option<&'static str> {
        match flag {
            UiFlag::Loading => Some("Resolving link..."),
            UiFlag::DownloadProgress => Some("Server is downloading the video..."),
            _ => None,
        }
    }

    fn start_spinner(&self, flag: UiFlag, message: &'static str) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }
        let Ok(mut spinners) = self.spinners.lock() else {
            return;
        };
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Some(previous) = spinners.insert(flag, spinner) {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self, flag: UiFlag) {
        if let Ok(mut spinners) = self.spinners.lock() {
            if let Some(spinner) = spinners.remove(&flag) {
                spinner.finish_and_clear();
            }
        }
    }

    fn is_spinning(&self, flag: UiFlag) -> bool {
        self.spinners
            .lock()
            .map(|spinners| spinners.contains_key(&flag))
            .unwrap_or(false)
    }

    /// Report local save progress
    pub fn update_transfer(&self, written: u64, total: Option<u64>) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }
        let Ok(mut slot) = self.transfer_bar.lock() else {
            return;
        };
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new(total.unwrap_or(0));
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });
        if let Some(total) = total {
            bar.set_length(total);
        }
        bar.set_position(written);
    }

    /// Finish the local save progress bar
    pub fn finish_transfer(&self, message: &str) {
        if let Ok(mut slot) = self.transfer_bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_with_message(message.to_string());
            }
        }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("ℹ️  {}", message);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("✅ {}", message.green());
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("❌ {}", message.red());
    }

    /// Print the platforms the service supports
    pub fn print_platforms(&self, platforms: &[PlatformEntry]) {
        println!("{}", "Supported platforms:".bold());
        for platform in platforms {
            println!("  • {} ({})", platform.name, platform.key.dimmed());
        }
    }

    fn absolute_link(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.server.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }
}

impl View for TerminalView {
    fn set_flag(&self, flag: UiFlag, visible: bool) {
        match (Self::spinner_message(flag), visible) {
            (Some(message), true) => self.start_spinner(flag, message),
            (Some(_), false) => self.stop_spinner(flag),
            (None, _) => {}
        }
    }

    fn render_video(&self, video: &ResolvedVideo, summary: &VideoSummary) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!();
        println!("📹 {}", summary.title.bold());
        println!("👤 {}", summary.author);
        println!(
            "❤️  {}   💬 {}   🔁 {}   ⏱️  {}",
            summary.likes, summary.comments, summary.shares, summary.duration
        );

        match summary.availability {
            DownloadAvailability::Watermarkless => {
                println!("{}", "✅ Watermark-free download link available".green());
                if let Some(note) = video.note.as_deref().filter(|n| !n.is_empty()) {
                    println!("   {}", note.dimmed());
                }
            }
            DownloadAvailability::Available => {
                println!("{}", "⬇️  Download link available".cyan());
            }
            DownloadAvailability::Unavailable => {
                println!("{}", "ℹ️  Automatic download is not available".yellow());
                let note = video
                    .note
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_UNAVAILABLE_HINT);
                println!("   {}", note.dimmed());
                for alternative in &video.alternatives {
                    println!(
                        "   • {}: {} ({})",
                        alternative.name.bold(),
                        alternative.description,
                        alternative.url.underline()
                    );
                }
            }
        }

        if self.verbosity == VerbosityLevel::Verbose {
            if let Some(url) = &video.video_url {
                println!("🔗 {}", url.dimmed());
            }
        }
        println!();
    }

    fn render_cover(&self, cover: &Cover) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }
        match &cover.source {
            CoverSource::Direct(url) => {
                println!("🖼️  Cover: {} ({})", url, format_bytes(cover.bytes.len() as u64))
            }
            CoverSource::Proxied(url) => println!(
                "🖼️  Cover: {} via proxy ({})",
                url,
                format_bytes(cover.bytes.len() as u64)
            ),
            CoverSource::Placeholder => println!("🖼️  Cover: {}", "unavailable".dimmed()),
        }
    }

    fn show_error(&self, message: &str) {
        self.error(message);
    }

    fn show_toast(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => self.success(&toast.message),
            ToastKind::Error => self.error(&toast.message),
        }
    }

    fn set_download_link(&self, url: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("💾 Ready: {}", self.absolute_link(url).underline());
        }
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::video_info::Alternative;

    fn unavailable_video() -> ResolvedVideo {
        ResolvedVideo {
            title: Some("T".to_string()),
            alternatives: vec![Alternative {
                name: "SnapTik".to_string(),
                description: "Web downloader".to_string(),
                url: "https://snaptik.app".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_spinner_follows_flags() {
        let view = TerminalView::new(VerbosityLevel::Normal, "http://127.0.0.1:4000");
        view.set_flag(UiFlag::Loading, true);
        assert!(view.is_spinning(UiFlag::Loading));
        view.set_flag(UiFlag::VideoPanel, true);
        assert!(!view.is_spinning(UiFlag::VideoPanel));
        view.set_flag(UiFlag::Loading, false);
        assert!(!view.is_spinning(UiFlag::Loading));
    }

    #[test]
    fn test_quiet_mode_has_no_spinners() {
        let view = TerminalView::new(VerbosityLevel::Quiet, "http://127.0.0.1:4000");
        view.set_flag(UiFlag::DownloadProgress, true);
        assert!(!view.is_spinning(UiFlag::DownloadProgress));
    }

    #[test]
    fn test_absolute_link() {
        let view = TerminalView::new(VerbosityLevel::Normal, "http://127.0.0.1:4000/");
        assert_eq!(
            view.absolute_link("/download/a.mp4"),
            "http://127.0.0.1:4000/download/a.mp4"
        );
        assert_eq!(
            view.absolute_link("https://cdn.example.net/a.mp4"),
            "https://cdn.example.net/a.mp4"
        );
    }

    #[test]
    fn test_render_all_availability_kinds() {
        let view = TerminalView::new(VerbosityLevel::Verbose, "http://127.0.0.1:4000");
        let mut video = unavailable_video();
        // Should not panic
        view.render_video(&video, &VideoSummary::from_video(&video));

        video.video_url = Some("https://v.tiktokcdn.com/x".to_string());
        video.note = Some("HD".to_string());
        view.render_video(&video, &VideoSummary::from_video(&video));

        video.video_url = Some("https://cdn.other.net/x.mp4".to_string());
        view.render_video(&video, &VideoSummary::from_video(&video));
    }

    #[test]
    fn test_render_cover_and_toasts() {
        let view = TerminalView::new(VerbosityLevel::Normal, "http://127.0.0.1:4000");
        // Should not panic
        view.render_cover(&Cover::placeholder());
        view.render_cover(&Cover {
            source: CoverSource::Proxied("https://fbcdn.net/a.jpg".to_string()),
            bytes: vec![0; 2048],
        });
        view.show_toast(&Toast::success("copied"));
        view.show_toast(&Toast::error("failed"));
        view.set_download_link("/download/a.mp4");
    }

    #[test]
    fn test_transfer_bar() {
        let view = TerminalView::new(VerbosityLevel::Normal, "http://127.0.0.1:4000");
        view.update_transfer(10, Some(100));
        view.update_transfer(100, Some(100));
        view.finish_transfer("saved");
        assert!(view.transfer_bar.lock().unwrap().is_none());
    }
}
