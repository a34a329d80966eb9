//! Error types for vidgrab

use thiserror::Error;

/// Main error type for vidgrab operations
#[derive(Debug, Error)]
pub enum VidgrabError {
    #[error("Empty share link")]
    EmptyInput,

    #[error("Unsupported share link: {0}")]
    UnsupportedLink(String),

    #[error("No resolved video")]
    NotResolved,

    #[error("Resolved video has no media URL")]
    NoMediaUrl,

    #[error("No downloaded file to clean up")]
    NothingToCleanUp,

    #[error("Service reported failure: {}", .0.as_deref().unwrap_or("no reason given"))]
    Remote(Option<String>),

    #[error("Service returned HTTP {status}: {}", .message.as_deref().unwrap_or("no reason given"))]
    Status { status: u16, message: Option<String> },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl VidgrabError {
    /// Input rejected before any request was made
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VidgrabError::EmptyInput | VidgrabError::UnsupportedLink(_)
        )
    }

    /// The service answered, but reported a failure
    pub fn is_remote(&self) -> bool {
        matches!(self, VidgrabError::Remote(_) | VidgrabError::Status { .. })
    }

    /// The exchange itself broke (network, malformed response)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            VidgrabError::Transport(_) | VidgrabError::JsonError(_) | VidgrabError::UrlError(_)
        )
    }

    /// Message supplied by the service, if any
    pub fn service_message(&self) -> Option<&str> {
        match self {
            VidgrabError::Remote(Some(message)) => Some(message),
            VidgrabError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text to show the user: the service's own message, or `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        self.service_message()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_taxonomy() {
        assert!(VidgrabError::EmptyInput.is_validation());
        assert!(VidgrabError::UnsupportedLink("x".to_string()).is_validation());
        assert!(VidgrabError::Remote(None).is_remote());
        assert!(VidgrabError::Status {
            status: 500,
            message: None
        }
        .is_remote());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = VidgrabError::from(json_err);
        assert!(err.is_transport());
        assert!(!err.is_remote());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_user_message_prefers_service_text() {
        let err = VidgrabError::Remote(Some("quota exceeded".to_string()));
        assert_eq!(err.user_message("Download failed"), "quota exceeded");

        let err = VidgrabError::Status {
            status: 404,
            message: Some("file not found".to_string()),
        };
        assert_eq!(err.user_message("Cleanup failed"), "file not found");
    }

    #[test]
    fn test_user_message_fallback() {
        assert_eq!(VidgrabError::Remote(None).user_message("Failed"), "Failed");
        assert_eq!(
            VidgrabError::Remote(Some("  ".to_string())).user_message("Failed"),
            "Failed"
        );
        assert_eq!(VidgrabError::NotResolved.user_message("Failed"), "Failed");
    }

    #[test]
    fn test_display() {
        let err = VidgrabError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "Service returned HTTP 502: no reason given");
        let err = VidgrabError::Remote(Some("boom".to_string()));
        assert_eq!(err.to_string(), "Service reported failure: boom");
    }
}
