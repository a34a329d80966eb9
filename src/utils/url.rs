//! Share link validation and cover URL rules

use crate::error::VidgrabError;
use regex::Regex;

/// A platform the allowlist recognises, with the pattern its links match
#[derive(Debug, Clone)]
pub struct PlatformPattern {
    /// Short platform key (e.g. "tiktok")
    pub key: String,
    /// Display name
    pub name: String,
    pattern: Regex,
}

impl PlatformPattern {
    /// Compile a new platform pattern
    pub fn new(key: &str, name: &str, pattern: &str) -> Result<Self, VidgrabError> {
        Ok(Self {
            key: key.to_string(),
            name: name.to_string(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Check whether `link` contains this platform's domain
    pub fn matches(&self, link: &str) -> bool {
        self.pattern.is_match(link)
    }

    /// The underlying pattern source
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Domain patterns accepted out of the box: (key, name, pattern)
pub const DEFAULT_PLATFORM_PATTERNS: &[(&str, &str, &str)] = &[
    ("tiktok", "TikTok", r"tiktok\.com"),
    ("tiktok", "TikTok", r"vm\.tiktok\.com"),
    ("douyin", "Douyin", r"douyin\.com"),
    ("douyin", "Douyin", r"iesdouyin\.com"),
    ("instagram", "Instagram", r"instagram\.com"),
    ("instagram", "Instagram", r"instagr\.am"),
    ("youtube", "YouTube", r"youtube\.com"),
    ("youtube", "YouTube", r"youtu\.be"),
    ("twitter", "Twitter/X", r"twitter\.com"),
    ("twitter", "Twitter/X", r"x\.com"),
    ("facebook", "Facebook", r"facebook\.com"),
    ("facebook", "Facebook", r"fb\.watch"),
    ("bilibili", "Bilibili", r"bilibili\.com"),
    ("bilibili", "Bilibili", r"b23\.tv"),
    ("weibo", "Weibo", r"weibo\.com"),
    ("weibo", "Weibo", r"weibo\.cn"),
];

/// Allowlist of share link patterns
#[derive(Debug, Clone)]
pub struct LinkValidator {
    platforms: Vec<PlatformPattern>,
}

impl LinkValidator {
    /// Validator with the built-in platform list
    pub fn new() -> Self {
        let platforms = DEFAULT_PLATFORM_PATTERNS
            .iter()
            .filter_map(|(key, name, pattern)| PlatformPattern::new(key, name, pattern).ok())
            .collect();
        Self { platforms }
    }

    /// Validator with an explicit platform list
    pub fn with_platforms(platforms: Vec<PlatformPattern>) -> Self {
        Self { platforms }
    }

    /// Add an extra pattern to the allowlist
    pub fn allow(mut self, pattern: &str) -> Result<Self, VidgrabError> {
        self.platforms
            .push(PlatformPattern::new("custom", "Custom", pattern)?);
        Ok(self)
    }

    /// Registered platform patterns
    pub fn platforms(&self) -> &[PlatformPattern] {
        &self.platforms
    }

    /// Trim `input` and check it against the allowlist.
    ///
    /// Returns the trimmed link on success.
    pub fn validate<'a>(&self, input: &'a str) -> Result<&'a str, VidgrabError> {
        let link = input.trim();
        if link.is_empty() {
            return Err(VidgrabError::EmptyInput);
        }
        if !self.is_supported(link) {
            return Err(VidgrabError::UnsupportedLink(link.to_string()));
        }
        Ok(link)
    }

    /// Check if the link mentions any recognised platform
    pub fn is_supported(&self, link: &str) -> bool {
        self.platforms.iter().any(|p| p.matches(link))
    }

    /// First platform whose pattern matches the link
    pub fn detect_platform(&self, link: &str) -> Option<&PlatformPattern> {
        self.platforms.iter().find(|p| p.matches(link))
    }
}

impl Default for LinkValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cover hosts that refuse hotlinked image requests
const PROXY_ONLY_COVER_HOSTS: &[&str] = &["instagram", "cdninstagram", "fbcdn"];

/// Check if a cover image has to be fetched through the image proxy
pub fn cover_needs_proxy(cover_url: &str) -> bool {
    PROXY_ONLY_COVER_HOSTS
        .iter()
        .any(|host| cover_url.contains(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty() {
        let validator = LinkValidator::new();
        assert!(matches!(validator.validate(""), Err(VidgrabError::EmptyInput)));
        assert!(matches!(
            validator.validate("   \t\n"),
            Err(VidgrabError::EmptyInput)
        ));
    }

    #[test]
    fn test_validate_rejects_unrelated() {
        let validator = LinkValidator::new();
        assert!(matches!(
            validator.validate("not a url"),
            Err(VidgrabError::UnsupportedLink(_))
        ));
        assert!(matches!(
            validator.validate("https://vimeo.com/123"),
            Err(VidgrabError::UnsupportedLink(_))
        ));
    }

    #[test]
    fn test_validate_accepts_known_platforms() {
        let validator = LinkValidator::new();
        for link in [
            "https://vm.tiktok.com/ABC123",
            "https://www.tiktok.com/@user/video/123",
            "https://v.douyin.com/abc/",
            "https://www.instagram.com/reel/xyz/",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://x.com/user/status/1",
            "https://fb.watch/abc/",
            "https://b23.tv/xyz",
            "https://weibo.cn/detail/1",
        ] {
            assert!(validator.validate(link).is_ok(), "{} should be accepted", link);
        }
    }

    #[test]
    fn test_validate_trims_and_accepts_share_text() {
        let validator = LinkValidator::new();
        assert_eq!(
            validator.validate("  https://vm.tiktok.com/ABC123  ").unwrap(),
            "https://vm.tiktok.com/ABC123"
        );
        assert!(validator
            .validate("Watch this! https://vm.tiktok.com/ABC123 #fyp")
            .is_ok());
    }

    #[test]
    fn test_detect_platform() {
        let validator = LinkValidator::new();
        assert_eq!(
            validator.detect_platform("https://youtu.be/x").unwrap().key,
            "youtube"
        );
        assert_eq!(
            validator
                .detect_platform("https://www.bilibili.com/video/BV1")
                .unwrap()
                .name,
            "Bilibili"
        );
        assert!(validator.detect_platform("https://example.org").is_none());
    }

    #[test]
    fn test_allow_extra_pattern() {
        let validator = LinkValidator::new().allow(r"vimeo\.com").unwrap();
        assert!(validator.is_supported("https://vimeo.com/123"));
        assert!(LinkValidator::new().allow("(unclosed").is_err());
    }

    #[test]
    fn test_empty_allowlist_rejects_everything() {
        let validator = LinkValidator::with_platforms(Vec::new());
        assert!(validator.validate("https://vm.tiktok.com/ABC123").is_err());
    }

    #[test]
    fn test_cover_needs_proxy() {
        assert!(cover_needs_proxy(
            "https://scontent.cdninstagram.com/v/t51/abc.jpg"
        ));
        assert!(cover_needs_proxy("https://scontent-lax.xx.fbcdn.net/a.jpg"));
        assert!(!cover_needs_proxy("https://p16-sign.tiktokcdn.com/a.jpeg"));
    }
}
