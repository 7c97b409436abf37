// Instagram profile and post model, and lazy post iteration

use std::collections::VecDeque;

use serde_json::Value;
use time::OffsetDateTime;
use tracing::debug;

use crate::scraper::errors::ScrapeError;
use crate::scraper::models::local_offset;
use crate::scraper::traits::ProfileSource;

/// A post that failed to parse is an `Err(ScrapeError::Item)`
pub type PostItem = Result<Post, ScrapeError>;

/// Resolved profile with its first page of posts
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub follower_count: u64,
    pub is_private: bool,
    pub followed_by_viewer: bool,
    pub first_page: PostPage,
}

/// One page of a profile's timeline
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub items: Vec<PostItem>,
    /// Cursor for the next page, `None` on the last page
    pub end_cursor: Option<String>,
}

/// A timeline post. Every attribute except the type name may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub typename: String,
    pub shortcode: Option<String>,
    pub is_video: bool,
    pub video_view_count: Option<u64>,
    pub likes: Option<u64>,
    pub display_url: Option<String>,
    pub caption: Option<String>,
    pub taken_at: Option<OffsetDateTime>,
}

impl Post {
    /// Build from a GraphQL timeline node
    pub fn from_node(node: &Value) -> PostItem {
        let obj = node
            .as_object()
            .ok_or_else(|| ScrapeError::Item("timeline node is not an object".to_string()))?;

        let typename = obj
            .get("__typename")
            .and_then(Value::as_str)
            .ok_or_else(|| ScrapeError::Item("timeline node has no __typename".to_string()))?
            .to_string();

        let likes = node
            .pointer("/edge_liked_by/count")
            .or_else(|| node.pointer("/edge_media_preview_like/count"))
            .and_then(Value::as_u64);

        let caption = node
            .pointer("/edge_media_to_caption/edges/0/node/text")
            .and_then(Value::as_str)
            .map(str::to_string);

        let taken_at = obj
            .get("taken_at_timestamp")
            .and_then(Value::as_i64)
            .and_then(|ts| OffsetDateTime::from_unix_timestamp(ts).ok());

        Ok(Post {
            typename,
            shortcode: obj.get("shortcode").and_then(Value::as_str).map(str::to_string),
            is_video: obj.get("is_video").and_then(Value::as_bool).unwrap_or(false),
            video_view_count: obj.get("video_view_count").and_then(Value::as_u64),
            likes,
            display_url: obj.get("display_url").and_then(Value::as_str).map(str::to_string),
            caption,
            taken_at,
        })
    }

    /// Single-video post (a reel), as opposed to images and carousels
    pub fn is_reel(&self) -> bool {
        self.is_video && self.typename == "GraphVideo"
    }

    /// Platform permalink: `/reel/<code>/` for reels, `/p/<code>/` otherwise
    pub fn permalink(&self) -> Option<String> {
        self.shortcode
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| super::permalink(code, self.is_reel()))
    }

    /// Upload time in the local offset
    pub fn date_local(&self) -> Option<OffsetDateTime> {
        self.taken_at.map(|t| t.to_offset(local_offset()))
    }
}

/// Parse an `edge_owner_to_timeline_media` connection
pub fn parse_media_connection(connection: &Value) -> PostPage {
    let items = connection
        .get("edges")
        .and_then(Value::as_array)
        .map(|edges| {
            edges
                .iter()
                .map(|edge| match edge.get("node") {
                    Some(node) => Post::from_node(node),
                    None => Err(ScrapeError::Item("timeline edge has no node".to_string())),
                })
                .collect()
        })
        .unwrap_or_default();

    let has_next = connection
        .pointer("/page_info/has_next_page")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let end_cursor = if has_next {
        connection
            .pointer("/page_info/end_cursor")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    } else {
        None
    };

    PostPage { items, end_cursor }
}

/// Lazily walks a profile's posts page by page, most recent first
pub struct PostStream<'a> {
    source: &'a dyn ProfileSource,
    profile: &'a Profile,
    buffer: VecDeque<PostItem>,
    cursor: Option<String>,
}

impl<'a> PostStream<'a> {
    /// Fails with `PrivateProfile` when the session cannot see the posts
    pub fn new(source: &'a dyn ProfileSource, profile: &'a Profile) -> Result<Self, ScrapeError> {
        if profile.is_private && !profile.followed_by_viewer {
            return Err(ScrapeError::PrivateProfile(profile.username.clone()));
        }
        Ok(Self {
            source,
            profile,
            buffer: profile.first_page.items.iter().cloned().collect(),
            cursor: profile.first_page.end_cursor.clone(),
        })
    }

    /// Next post; `Ok(None)` once the timeline is exhausted.
    /// The outer error is a page-level failure, the inner one a single bad item.
    pub async fn next(&mut self) -> Result<Option<PostItem>, ScrapeError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            let cursor = match self.cursor.take() {
                Some(c) => c,
                None => return Ok(None),
            };
            debug!(source = self.source.name(), username = %self.profile.username, "fetching next page of posts");
            let page = self.source.posts_page(self.profile, &cursor).await?;
            if page.items.is_empty() {
                return Ok(None);
            }
            self.buffer.extend(page.items);
            self.cursor = page.end_cursor;
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;

    /// In-memory profile source for tests
    pub struct FakeSource {
        pub profile: Result<Profile, ScrapeError>,
        pub pages: HashMap<String, Result<PostPage, ScrapeError>>,
    }

    #[async_trait]
    impl ProfileSource for FakeSource {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn profile(&self, _username: &str) -> Result<Profile, ScrapeError> {
            self.profile.clone()
        }

        async fn posts_page(&self, _profile: &Profile, cursor: &str) -> Result<PostPage, ScrapeError> {
            self.pages
                .get(cursor)
                .cloned()
                .unwrap_or_else(|| Ok(PostPage::default()))
        }
    }

    pub fn video_node(code: &str, views: u64) -> Value {
        json!({
            "__typename": "GraphVideo",
            "shortcode": code,
            "is_video": true,
            "video_view_count": views,
            "edge_liked_by": {"count": views / 10},
            "display_url": format!("https://cdn.example/{}.jpg", code),
            "edge_media_to_caption": {"edges": [{"node": {"text": format!("caption {}", code)}}]},
            "taken_at_timestamp": 1_700_000_000
        })
    }

    pub fn image_node(code: &str) -> Value {
        json!({"__typename": "GraphImage", "shortcode": code, "is_video": false})
    }

    pub fn page(nodes: Vec<Value>, cursor: Option<&str>) -> PostPage {
        let connection = json!({
            "edges": nodes.into_iter().map(|n| json!({"node": n})).collect::<Vec<_>>(),
            "page_info": {"has_next_page": cursor.is_some(), "end_cursor": cursor}
        });
        parse_media_connection(&connection)
    }

    pub fn profile(first_page: PostPage) -> Profile {
        Profile {
            id: "42".to_string(),
            username: "nasa".to_string(),
            follower_count: 1000,
            is_private: false,
            followed_by_viewer: false,
            first_page,
        }
    }
}
