// Instagram session file: a JSON object of cookie name -> value

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::scraper::errors::ScrapeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstagramSession {
    cookies: BTreeMap<String, String>,
}

impl InstagramSession {
    pub fn from_cookies(cookies: BTreeMap<String, String>) -> Self {
        Self { cookies }
    }

    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScrapeError::InvalidInput(format!("cannot read {}: {}", path.display(), e)))?;
        let cookies: BTreeMap<String, String> = serde_json::from_str(&content)
            .map_err(|e| ScrapeError::ParseError(format!("session file {}: {}", path.display(), e)))?;
        Ok(Self { cookies })
    }

    /// Load the session if possible; a missing or broken file only costs capability
    pub fn load_or_warn(path: Option<&Path>) -> Option<Self> {
        let Some(path) = path else {
            warn!("No session file configured. Some data might be limited.");
            return None;
        };
        match Self::load(path) {
            Ok(session) if session.is_logged_in() => {
                debug!(path = %path.display(), "loaded Instagram session");
                Some(session)
            }
            Ok(_) => {
                warn!(path = %path.display(), "session file has no sessionid cookie. Some data might be limited.");
                None
            }
            Err(e) => {
                warn!("No usable session file ({}). Some data might be limited.", e);
                None
            }
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.cookies.get("sessionid").map_or(false, |v| !v.is_empty())
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies.get("csrftoken").map(String::as_str)
    }

    /// `Cookie` header value
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Default session location under the user config directory
pub fn default_session_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("social-scraper").join("instagram_session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"sessionid": "abc", "csrftoken": "tok", "ds_user_id": "1"}}"#).unwrap();

        let session = InstagramSession::load(&path).unwrap();
        assert!(session.is_logged_in());
        assert_eq!(session.csrf_token(), Some("tok"));
        assert_eq!(session.cookie_header(), "csrftoken=tok; ds_user_id=1; sessionid=abc");
    }

    #[test]
    fn test_missing_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(InstagramSession::load(&missing).is_err());
        assert_eq!(InstagramSession::load_or_warn(Some(&missing)), None);
        assert_eq!(InstagramSession::load_or_warn(None), None);
    }

    #[test]
    fn test_session_without_sessionid_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"csrftoken": "tok"}"#).unwrap();
        assert_eq!(InstagramSession::load_or_warn(Some(&path)), None);
    }
}
