// Extractor diagnostics - classifies yt-dlp failures
//
// Maps yt-dlp stderr to the reason the platform refused the request,
// so the failure can be logged with a hint.

/// Reasons an extraction might fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingReason {
    /// HTTP 403 Forbidden - general access denied
    Http403Forbidden,

    /// Rate limiting (429 or similar)
    RateLimited,

    /// Bot detection / captcha page
    BotDetection,

    /// Platform requires a logged-in session
    LoginRequired,

    /// Private account or private video
    PrivateContent,

    /// Geographic restriction
    GeoBlocked,

    /// Network timeout (soft IP block)
    NetworkTimeout,

    /// Video or account deleted / unavailable
    Unavailable,

    /// yt-dlp has no extractor for this URL
    UnsupportedUrl,
}

impl BlockingReason {
    /// Check if cookies might help
    pub fn cookies_might_help(&self) -> bool {
        matches!(
            self,
            Self::Http403Forbidden
                | Self::BotDetection
                | Self::LoginRequired
                | Self::PrivateContent
        )
    }

    /// Check if proxy might help
    pub fn proxy_might_help(&self) -> bool {
        matches!(
            self,
            Self::Http403Forbidden
                | Self::GeoBlocked
                | Self::NetworkTimeout
                | Self::RateLimited
                | Self::BotDetection
        )
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::RateLimited => "Rate limited by the platform",
            Self::BotDetection => "Bot detection triggered",
            Self::LoginRequired => "Login required",
            Self::PrivateContent => "Private content",
            Self::GeoBlocked => "Geographic restriction",
            Self::NetworkTimeout => "Network timeout (possible IP throttling)",
            Self::Unavailable => "Content unavailable",
            Self::UnsupportedUrl => "Unsupported URL",
        }
    }

    /// One-line hint for the user, if there is something to try
    pub fn hint(&self) -> Option<&'static str> {
        if self.cookies_might_help() {
            Some("try passing --cookies with a cookies.txt from a logged-in browser")
        } else if self.proxy_might_help() {
            Some("try again later or pass --proxy")
        } else {
            None
        }
    }
}

/// Classify an extractor error message
pub fn diagnose_error(error: &str) -> Option<BlockingReason> {
    let lower = error.to_lowercase();
    let any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if any(&["timed out", "read timeout", "connect timeout"]) {
        return Some(BlockingReason::NetworkTimeout);
    }

    if any(&["http error 429", "too many requests", "rate-limit", "rate limit"]) {
        return Some(BlockingReason::RateLimited);
    }

    if any(&["captcha", "confirm you're not a bot", "sign in to confirm you"]) {
        return Some(BlockingReason::BotDetection);
    }

    if any(&["unsupported url"]) {
        return Some(BlockingReason::UnsupportedUrl);
    }

    if any(&["private video", "account is private"]) {
        return Some(BlockingReason::PrivateContent);
    }

    if any(&["login required", "login_required", "requires login", "use --cookies"]) {
        return Some(BlockingReason::LoginRequired);
    }

    if any(&["not available in your country", "geo restrict"]) {
        return Some(BlockingReason::GeoBlocked);
    }

    if any(&["video unavailable", "has been removed", "does not exist", "http error 404"]) {
        return Some(BlockingReason::Unavailable);
    }

    if any(&["http error 403", "403: forbidden", "403 forbidden"]) {
        return Some(BlockingReason::Http403Forbidden);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_detection() {
        let error = "Timed out after 30s";
        assert_eq!(diagnose_error(error), Some(BlockingReason::NetworkTimeout));
    }

    #[test]
    fn test_rate_limit_detection() {
        let error = "ERROR: [TikTok] HTTP Error 429: Too Many Requests";
        assert_eq!(diagnose_error(error), Some(BlockingReason::RateLimited));
    }

    #[test]
    fn test_bot_detection() {
        let error = "Sign in to confirm you're not a bot";
        assert_eq!(diagnose_error(error), Some(BlockingReason::BotDetection));
    }

    #[test]
    fn test_private_detection() {
        let error = "ERROR: [tiktok:user] someone: This account is private";
        assert_eq!(diagnose_error(error), Some(BlockingReason::PrivateContent));
    }

    #[test]
    fn test_login_detection() {
        let error = "ERROR: [Instagram] abc: Requested content is not available, login required";
        assert_eq!(diagnose_error(error), Some(BlockingReason::LoginRequired));
    }

    #[test]
    fn test_unavailable_detection() {
        let error = "ERROR: [youtube] dQw4w9WgXcQ: Video unavailable";
        assert_eq!(diagnose_error(error), Some(BlockingReason::Unavailable));
    }

    #[test]
    fn test_forbidden_detection() {
        let error = "ERROR: unable to download webpage: HTTP Error 403: Forbidden";
        assert_eq!(diagnose_error(error), Some(BlockingReason::Http403Forbidden));
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(diagnose_error("segmentation fault"), None);
    }

    #[test]
    fn test_status_digits_inside_ids_are_ignored() {
        let error = "ERROR: [TikTok] 7404112233445566778: Unable to extract webpage video data";
        assert_eq!(diagnose_error(error), None);
        let error = "ERROR: [youtube] x429x403: Unable to extract uploader id";
        assert_eq!(diagnose_error(error), None);
        assert_eq!(diagnose_error("please log in again"), None);
    }

    #[test]
    fn test_hints() {
        assert!(BlockingReason::PrivateContent.hint().is_some());
        assert!(BlockingReason::RateLimited.hint().is_some());
        assert!(BlockingReason::Unavailable.hint().is_none());
    }
}
