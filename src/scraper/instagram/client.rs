// Instagram web client: profile lookup and timeline pagination

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::posts::{parse_media_connection, PostPage, Profile};
use super::session::InstagramSession;
use crate::scraper::errors::ScrapeError;
use crate::scraper::traits::{PageFetcher, ProfileSource};

/// Web profile endpoint, returns the profile and its first 12 posts
const PROFILE_ENDPOINT: &str = "https://www.instagram.com/api/v1/users/web_profile_info/";

/// Timeline pagination query
const GRAPHQL_QUERY_ENDPOINT: &str = "https://www.instagram.com/graphql/query/";
const TIMELINE_QUERY_HASH: &str = "003056d32c2554def87228bc3fd9668a";
const PAGE_SIZE: u32 = 12;

/// Instagram internal app ID (public, embedded in the web app)
pub const IG_APP_ID: &str = "936619743392459";

pub struct InstagramWebClient<F: PageFetcher> {
    fetcher: F,
    session: Option<InstagramSession>,
}

impl<F: PageFetcher> InstagramWebClient<F> {
    pub fn new(fetcher: F, session: Option<InstagramSession>) -> Self {
        Self { fetcher, session }
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("X-IG-App-ID", IG_APP_ID.to_string()),
            ("X-Requested-With", "XMLHttpRequest".to_string()),
            ("Referer", "https://www.instagram.com/".to_string()),
            ("Accept", "*/*".to_string()),
        ];
        if let Some(session) = &self.session {
            headers.push(("Cookie", session.cookie_header()));
            if let Some(token) = session.csrf_token() {
                headers.push(("X-CSRFToken", token.to_string()));
            }
        }
        headers
    }

    async fn get_json(&self, url: &str, username: &str) -> Result<Value, ScrapeError> {
        let owned = self.headers();
        let headers: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let body = self
            .fetcher
            .get_text(url, &headers)
            .await
            .map_err(|e| map_http_error(e, username))?;

        let json: Value = serde_json::from_str(&body).map_err(|e| {
            // Instagram answers anonymous scrapers with the HTML login page
            if body.trim_start().starts_with('<') {
                ScrapeError::LoginRequired("Instagram returned the login page".to_string())
            } else {
                ScrapeError::ParseError(format!("Instagram response is not JSON: {}", e))
            }
        })?;

        if let Some(message) = json.get("message").and_then(Value::as_str) {
            if message.contains("checkpoint_required") || message.contains("login_required") {
                return Err(ScrapeError::LoginRequired(message.to_string()));
            }
        }
        Ok(json)
    }
}

/// Map HTTP failures onto the profile-level taxonomy
fn map_http_error(error: ScrapeError, username: &str) -> ScrapeError {
    match error {
        ScrapeError::Http { status: 404, .. } => ScrapeError::ProfileNotFound(username.to_string()),
        ScrapeError::Http { status: 401, url } | ScrapeError::Http { status: 403, url } => {
            ScrapeError::LoginRequired(url)
        }
        ScrapeError::Http { status: 429, url } => ScrapeError::RateLimited(url),
        other => other,
    }
}

/// Build a `Profile` from a `web_profile_info` response
pub fn parse_profile(username: &str, json: &Value) -> Result<Profile, ScrapeError> {
    let user = match json.pointer("/data/user") {
        Some(user) if user.is_object() => user,
        _ => return Err(ScrapeError::ProfileNotFound(username.to_string())),
    };

    let id = user
        .get("id")
        .and_then(|v| v.as_str().map(str::to_string).or_else(|| v.as_u64().map(|n| n.to_string())))
        .ok_or_else(|| ScrapeError::ParseError("profile has no id".to_string()))?;

    let follower_count = user
        .pointer("/edge_followed_by/count")
        .and_then(Value::as_u64)
        .unwrap_or_else(|| {
            debug!(username, "profile response has no follower count");
            0
        });

    let first_page = user
        .get("edge_owner_to_timeline_media")
        .map(parse_media_connection)
        .unwrap_or_default();

    Ok(Profile {
        id,
        username: user
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or(username)
            .to_string(),
        follower_count,
        is_private: user.get("is_private").and_then(Value::as_bool).unwrap_or(false),
        followed_by_viewer: user
            .get("followed_by_viewer")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        first_page,
    })
}

#[async_trait]
impl<F: PageFetcher> ProfileSource for InstagramWebClient<F> {
    fn name(&self) -> &'static str {
        "instagram-web"
    }

    async fn profile(&self, username: &str) -> Result<Profile, ScrapeError> {
        if username.trim().is_empty() {
            return Err(ScrapeError::InvalidInput("username must not be empty".to_string()));
        }
        let url = url::Url::parse_with_params(PROFILE_ENDPOINT, &[("username", username)])
            .map_err(|e| ScrapeError::InvalidInput(e.to_string()))?;
        debug!(username, "resolving Instagram profile");
        let json = self.get_json(url.as_str(), username).await?;
        parse_profile(username, &json)
    }

    async fn posts_page(&self, profile: &Profile, cursor: &str) -> Result<PostPage, ScrapeError> {
        let variables = serde_json::json!({
            "id": profile.id,
            "first": PAGE_SIZE,
            "after": cursor,
        })
        .to_string();
        let url = url::Url::parse_with_params(
            GRAPHQL_QUERY_ENDPOINT,
            &[("query_hash", TIMELINE_QUERY_HASH), ("variables", variables.as_str())],
        )
        .map_err(|e| ScrapeError::InvalidInput(e.to_string()))?;

        let json = self.get_json(url.as_str(), &profile.username).await?;
        let connection = json
            .pointer("/data/user/edge_owner_to_timeline_media")
            .ok_or_else(|| ScrapeError::ParseError("timeline page has no media connection".to_string()))?;
        Ok(parse_media_connection(connection))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned responses keyed by URL prefix
    #[derive(Default)]
    pub struct FakeFetcher {
        pub responses: Vec<(String, Result<String, ScrapeError>)>,
        pub requests: Mutex<Vec<(String, HashMap<String, String>)>>,
    }

    impl FakeFetcher {
        pub fn with(mut self, prefix: &str, response: Result<String, ScrapeError>) -> Self {
            self.responses.push((prefix.to_string(), response));
            self
        }

        fn respond(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, ScrapeError> {
            self.requests.lock().unwrap().push((
                url.to_string(),
                headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ));
            self.responses
                .iter()
                .find(|(prefix, _)| url.starts_with(prefix.as_str()))
                .map(|(_, r)| r.clone())
                .unwrap_or_else(|| Err(ScrapeError::Http { status: 404, url: url.to_string() }))
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn get_text(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, ScrapeError> {
            self.respond(url, headers)
        }

        async fn post_form(
            &self,
            url: &str,
            headers: &[(&str, &str)],
            _body: &str,
        ) -> Result<String, ScrapeError> {
            self.respond(url, headers)
        }
    }
}
