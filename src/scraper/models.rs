// Common data models for the fetchers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use time::{OffsetDateTime, UtcOffset};

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Platforms we collect metadata from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
    YouTube,
}

/// Numeric metrics a record may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    FollowerCount,
    ViewCount,
    LikeCount,
    CommentCount,
    AverageViewCount,
}

/// Platform-neutral view of anything a fetcher collected.
///
/// Only `canonical_url` decides whether a record is usable; every other
/// field is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadataRecord {
    pub platform: Platform,
    pub source_identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    pub metrics: BTreeMap<Metric, u64>,
    pub fields: BTreeMap<String, serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
}

impl MediaMetadataRecord {
    pub fn new(platform: Platform, source_identifier: impl Into<String>) -> Self {
        Self {
            platform,
            source_identifier: source_identifier.into(),
            canonical_url: None,
            metrics: BTreeMap::new(),
            fields: BTreeMap::new(),
            fetched_at: now_local(),
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.canonical_url = url;
        self
    }

    /// Record a metric if present
    pub fn metric(mut self, metric: Metric, value: Option<u64>) -> Self {
        if let Some(v) = value {
            self.metrics.insert(metric, v);
        }
        self
    }

    /// Record a descriptive field if present
    pub fn field<T: Serialize>(mut self, name: &str, value: Option<T>) -> Self {
        if let Some(v) = value.and_then(|v| serde_json::to_value(v).ok()) {
            if !v.is_null() {
                self.fields.insert(name.to_string(), v);
            }
        }
        self
    }

    pub fn is_successful(&self) -> bool {
        self.canonical_url.as_deref().map_or(false, |u| !u.is_empty())
    }
}

/// One video post in a reels report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelRecord {
    pub reel_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub timestamp: Option<OffsetDateTime>,
}

impl ReelRecord {
    pub fn to_record(&self, username: &str) -> MediaMetadataRecord {
        MediaMetadataRecord::new(Platform::Instagram, username)
            .with_url(Some(self.reel_url.clone()))
            .metric(Metric::ViewCount, self.view_count)
            .metric(Metric::LikeCount, self.like_count)
            .field("thumbnailUrl", self.thumbnail_url.as_ref())
            .field("caption", self.caption.as_ref())
            .field("uploadTimestamp", self.timestamp.and_then(|t| format_rfc3339(t)))
    }
}

/// Profile-level reels analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileReelsReport {
    pub username: String,
    pub follower_count: u64,
    pub reels_count: usize,
    pub reels: Vec<ReelRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub scraped_at: OffsetDateTime,
}

/// Why a profile-level fetch produced no report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ProfileNotFound,
    PrivateProfile,
    Other,
}

/// Structured `{error: reason}` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
    pub kind: ErrorKind,
}

/// Result of a reels fetch: a report or a structured error, never a raised error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReelsOutcome {
    Report(ProfileReelsReport),
    Error(ErrorReport),
}

impl ReelsOutcome {
    pub fn report(&self) -> Option<&ProfileReelsReport> {
        match self {
            Self::Report(r) => Some(r),
            Self::Error(_) => None,
        }
    }
}

/// Combined TikTok profile stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TikTokProfileStats {
    pub username: String,
    pub followers: u64,
    pub average_views: u64,
}

impl TikTokProfileStats {
    pub fn to_record(&self) -> MediaMetadataRecord {
        MediaMetadataRecord::new(Platform::TikTok, self.username.clone())
            .with_url(Some(format!("https://www.tiktok.com/@{}", self.username)))
            .metric(Metric::FollowerCount, Some(self.followers))
            .metric(Metric::AverageViewCount, Some(self.average_views))
    }
}

/// Allow-listed fields of a TikTok video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikTokVideoMetadata {
    pub username: Option<String>,
    pub description: Option<String>,
    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub upload_date: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
}

impl TikTokVideoMetadata {
    pub fn to_record(&self, source: &str) -> MediaMetadataRecord {
        MediaMetadataRecord::new(Platform::TikTok, source)
            .with_url(self.video_url.clone())
            .metric(Metric::ViewCount, self.views)
            .metric(Metric::LikeCount, self.likes)
            .metric(Metric::CommentCount, self.comments)
            .field("uploader", self.username.as_ref())
            .field("description", self.description.as_ref())
            .field("uploadTimestamp", self.upload_date.as_ref())
            .field("thumbnailUrl", self.thumbnail.as_ref())
    }
}

/// Allow-listed fields of a YouTube video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeVideoMetadata {
    pub id: Option<String>,
    pub title: Option<String>,
    pub uploader: Option<String>,
    pub channel_id: Option<String>,
    pub upload_date: Option<String>,
    pub duration: Option<f64>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub webpage_url: Option<String>,
    pub thumbnail: Option<String>,
}

impl YouTubeVideoMetadata {
    pub fn to_record(&self, source: &str) -> MediaMetadataRecord {
        MediaMetadataRecord::new(Platform::YouTube, source)
            .with_url(self.webpage_url.clone())
            .metric(Metric::ViewCount, self.view_count)
            .metric(Metric::LikeCount, self.like_count)
            .metric(Metric::CommentCount, self.comment_count)
            .field("id", self.id.as_ref())
            .field("title", self.title.as_ref())
            .field("uploader", self.uploader.as_ref())
            .field("channelId", self.channel_id.as_ref())
            .field("uploadTimestamp", self.upload_date.as_ref())
            .field("duration", self.duration)
            .field("description", self.description.as_ref())
            .field("categories", self.categories.as_ref())
            .field("tags", self.tags.as_ref())
            .field("thumbnailUrl", self.thumbnail.as_ref())
    }
}

/// Projection of a single Instagram post/reel from the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstagramMedia {
    #[serde(rename = "__typename")]
    pub typename: Option<String>,
    pub shortcode: Option<String>,
    pub dimensions: Option<serde_json::Value>,
    pub display_url: Option<String>,
    pub display_resources: Option<serde_json::Value>,
    pub has_audio: Option<bool>,
    pub video_url: Option<String>,
    pub video_view_count: Option<u64>,
    pub video_play_count: Option<u64>,
    pub is_video: Option<bool>,
    pub caption: Option<String>,
    pub is_paid_partnership: Option<bool>,
    pub location: Option<serde_json::Value>,
    pub owner: Option<serde_json::Value>,
    pub product_type: Option<String>,
    pub video_duration: Option<f64>,
    pub thumbnail_src: Option<String>,
    pub clips_music_attribution_info: Option<serde_json::Value>,
    pub sidecar: Option<serde_json::Value>,
}

impl InstagramMedia {
    pub fn to_record(&self, source: &str) -> MediaMetadataRecord {
        let canonical = self
            .shortcode
            .as_ref()
            .map(|code| crate::scraper::instagram::permalink(code, self.is_video.unwrap_or(false)));
        MediaMetadataRecord::new(Platform::Instagram, source)
            .with_url(canonical)
            .metric(Metric::ViewCount, self.video_view_count)
            .field("caption", self.caption.as_ref())
            .field("thumbnailUrl", self.thumbnail_src.as_ref().or(self.display_url.as_ref()))
            .field(
                "uploader",
                self.owner.as_ref().and_then(|o| o.get("username")).and_then(|u| u.as_str()),
            )
    }
}

/// Network configuration for HTTP and yt-dlp
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// SOCKS5/HTTP proxy URL (e.g., "socks5://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Timeout in seconds
    pub timeout: Option<u32>,
}

impl NetworkConfig {
    pub fn timeout_secs(&self) -> u64 {
        u64::from(self.timeout.unwrap_or(30))
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: Some(30),
        }
    }
}

/// Local UTC offset, read once.
///
/// `time` refuses to read the offset once other threads exist, so binaries
/// call this before starting the runtime. Falls back to UTC.
pub fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

/// Current time in the local offset
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(local_offset())
}

pub fn format_rfc3339(t: OffsetDateTime) -> Option<String> {
    t.format(&time::format_description::well_known::Rfc3339).ok()
}
