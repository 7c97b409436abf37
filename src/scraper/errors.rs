// Error types shared by every fetcher

use thiserror::Error;

use super::extractors::{diagnose_error, BlockingReason};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    /// Missing or malformed input (username, URL, count)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The profile does not exist on the platform
    #[error("Profile @{0} does not exist")]
    ProfileNotFound(String),

    /// The profile is private and the session does not follow it
    #[error("Profile @{0} is private")]
    PrivateProfile(String),

    /// Video deleted, removed or never existed
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    /// The platform wants a logged-in session for this request
    #[error("Login required: {0}")]
    LoginRequired(String),

    /// Network timeout while talking to the platform
    #[error("Network timeout: the platform is not responding")]
    NetworkTimeout,

    /// Rate limited or bot-checked by the platform
    #[error("Request throttled by the platform: {0}")]
    RateLimited(String),

    /// Non-success HTTP status
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Transport-level failure (DNS, TLS, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// yt-dlp or python not found in system
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Failed to parse collaborator output
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Command execution failed
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// A single list item could not be read; the surrounding loop continues
    #[error("Skipped item: {0}")]
    Item(String),

    /// Unknown error with details
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Convert from extractor stderr / free-form messages
impl From<String> for ScrapeError {
    fn from(s: String) -> Self {
        match diagnose_error(&s) {
            Some(BlockingReason::NetworkTimeout) => return Self::NetworkTimeout,
            Some(BlockingReason::RateLimited) | Some(BlockingReason::BotDetection) => {
                return Self::RateLimited(s)
            }
            Some(BlockingReason::LoginRequired) | Some(BlockingReason::PrivateContent) => {
                return Self::LoginRequired(s)
            }
            Some(BlockingReason::Unavailable) => return Self::VideoUnavailable(s),
            Some(BlockingReason::UnsupportedUrl) => return Self::InvalidInput(s),
            _ => {}
        }

        if s.contains("command not found") || s.contains("No such file") {
            return Self::ToolNotFound(s);
        }

        let lower = s.to_lowercase();
        if lower.contains("failed to parse") || lower.contains("invalid json") || lower.contains("jsondecodeerror") {
            return Self::ParseError(s);
        }

        Self::Unknown(s)
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::NetworkTimeout;
        }
        if let Some(status) = err.status() {
            return Self::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(err: std::io::Error) -> Self {
        Self::ExecutionError(err.to_string())
    }
}

impl From<csv::Error> for ScrapeError {
    fn from(err: csv::Error) -> Self {
        Self::ExecutionError(format!("CSV write failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_classification() {
        assert_eq!(
            ScrapeError::from("ERROR: Timed out after 30s".to_string()),
            ScrapeError::NetworkTimeout
        );
        assert!(matches!(
            ScrapeError::from("ERROR: [TikTok] HTTP Error 429: Too Many Requests".to_string()),
            ScrapeError::RateLimited(_)
        ));
        assert!(matches!(
            ScrapeError::from("ERROR: [youtube] abc: Video unavailable".to_string()),
            ScrapeError::VideoUnavailable(_)
        ));
        assert!(matches!(
            ScrapeError::from("ERROR: Unsupported URL: https://example.com".to_string()),
            ScrapeError::InvalidInput(_)
        ));
        assert!(matches!(
            ScrapeError::from("something odd".to_string()),
            ScrapeError::Unknown(_)
        ));
    }

    #[test]
    fn test_ids_and_plain_words_do_not_classify() {
        assert!(matches!(
            ScrapeError::from(
                "ERROR: [TikTok] 7404112233445566778: Unable to extract webpage video data".to_string()
            ),
            ScrapeError::Unknown(_)
        ));
        assert!(matches!(
            ScrapeError::from("ERROR: [youtube] 1timeout: could not parse player".to_string()),
            ScrapeError::Unknown(_)
        ));
        assert!(matches!(
            ScrapeError::from("ERROR: Failed to parse JSON (caused by JSONDecodeError)".to_string()),
            ScrapeError::ParseError(_)
        ));
        assert!(matches!(
            ScrapeError::from("ERROR: [TikTok] 1: HTTP Error 404: Not Found".to_string()),
            ScrapeError::VideoUnavailable(_)
        ));
    }
}
