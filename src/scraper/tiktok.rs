// TikTok profile stats and single-video metadata

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, error, warn};

use super::errors::ScrapeError;
use super::extractors::{ExtractorConfig, FlatEntry, InfoExtractor};
use super::models::{TikTokProfileStats, TikTokVideoMetadata};
use super::traits::PageFetcher;
use super::utils::parse_count_string;

const TIKTOK_BASE: &str = "https://www.tiktok.com";

/// Minimal identity TikTok still answers with the full profile page
const PROFILE_USER_AGENT: &str = "Mozilla/5.0";

pub const DEFAULT_MAX_VIDEOS: usize = 20;

lazy_static! {
    static ref FOLLOWER_COUNT_RE: Regex = Regex::new(r#""followerCount":\s?(\d+)"#).unwrap();
}

/// First `"followerCount"` value in the hydration JSON of a profile page.
/// Rendered follower text is not consulted.
pub fn extract_follower_count(html: &str) -> Option<u64> {
    FOLLOWER_COUNT_RE
        .captures(html)
        .and_then(|caps| parse_count_string(&caps[1]).ok())
}

/// Absolute URL of a flat-listing entry
fn resolve_entry_url(entry: &FlatEntry, username: &str) -> Result<String, ScrapeError> {
    match (entry.url.as_deref(), entry.id.as_deref()) {
        (Some(url), _) if url.starts_with("http") => Ok(url.to_string()),
        (Some(path), _) => Ok(format!("{}{}", TIKTOK_BASE, path)),
        (None, Some(id)) => Ok(format!("{}/@{}/video/{}", TIKTOK_BASE, username, id)),
        (None, None) => Err(ScrapeError::ParseError("listing entry has neither url nor id".to_string())),
    }
}

fn profile_url(username: &str) -> Result<String, ScrapeError> {
    let username = username.trim().trim_start_matches('@');
    if username.is_empty() {
        return Err(ScrapeError::InvalidInput("username must not be empty".to_string()));
    }
    Ok(format!("{}/@{}", TIKTOK_BASE, username))
}

#[derive(Deserialize)]
struct ViewCount {
    view_count: Option<u64>,
}

pub struct TikTokProfileStatsFetcher {
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn InfoExtractor>,
    config: ExtractorConfig,
}

impl TikTokProfileStatsFetcher {
    pub fn new(fetcher: Box<dyn PageFetcher>, extractor: Box<dyn InfoExtractor>, config: ExtractorConfig) -> Self {
        Self {
            fetcher,
            extractor,
            config,
        }
    }

    pub async fn try_fetch_follower_count(&self, username: &str) -> Result<u64, ScrapeError> {
        let url = profile_url(username)?;
        let html = self
            .fetcher
            .get_text(&url, &[("User-Agent", PROFILE_USER_AGENT)])
            .await?;
        match extract_follower_count(&html) {
            Some(count) => Ok(count),
            None => {
                debug!(username, "no follower count in profile page");
                Ok(0)
            }
        }
    }

    /// Follower count, 0 when absent or on any failure
    pub async fn fetch_follower_count(&self, username: &str) -> u64 {
        self.try_fetch_follower_count(username).await.unwrap_or_else(|e| {
            warn!(username, "follower count unavailable: {}", e);
            0
        })
    }

    pub async fn try_fetch_average_views(&self, username: &str, max_videos: usize) -> Result<u64, ScrapeError> {
        let url = profile_url(username)?;
        let listing = self.extractor.extract_flat(&url, max_videos, &self.config).await?;
        debug!(username, entries = listing.entries.len(), "flat listing fetched");
        if listing.entries.is_empty() {
            return Ok(0);
        }

        let mut views = Vec::with_capacity(listing.entries.len());
        for entry in &listing.entries {
            let video_url = resolve_entry_url(entry, username)?;
            let info = self.extractor.extract_video(&video_url, &self.config).await?;
            let count: ViewCount = serde_json::from_value(info)?;
            views.push(count.view_count.unwrap_or(0));
        }

        let total: u64 = views.iter().sum();
        Ok(total / views.len() as u64)
    }

    /// Mean views over the most recent `max_videos`, 0 when empty or on any failure
    pub async fn fetch_average_views(&self, username: &str, max_videos: usize) -> u64 {
        self.try_fetch_average_views(username, max_videos)
            .await
            .unwrap_or_else(|e| {
                warn!(username, "average views unavailable: {}", e);
                0
            })
    }

    pub async fn fetch_stats(&self, username: &str) -> TikTokProfileStats {
        let username = username.trim().trim_start_matches('@');
        TikTokProfileStats {
            username: username.to_string(),
            followers: self.fetch_follower_count(username).await,
            average_views: self.fetch_average_views(username, DEFAULT_MAX_VIDEOS).await,
        }
    }
}

/// Raw yt-dlp keys behind `TikTokVideoMetadata`
#[derive(Deserialize)]
struct TikTokInfo {
    uploader: Option<String>,
    description: Option<String>,
    view_count: Option<u64>,
    like_count: Option<u64>,
    comment_count: Option<u64>,
    upload_date: Option<String>,
    thumbnail: Option<String>,
    webpage_url: Option<String>,
}

impl From<TikTokInfo> for TikTokVideoMetadata {
    fn from(info: TikTokInfo) -> Self {
        Self {
            username: info.uploader,
            description: info.description,
            views: info.view_count,
            likes: info.like_count,
            comments: info.comment_count,
            upload_date: info.upload_date,
            thumbnail: info.thumbnail,
            video_url: info.webpage_url,
        }
    }
}

pub struct TikTokVideoMetadataFetcher {
    extractor: Box<dyn InfoExtractor>,
    config: ExtractorConfig,
}

impl TikTokVideoMetadataFetcher {
    pub fn new(extractor: Box<dyn InfoExtractor>, config: ExtractorConfig) -> Self {
        Self { extractor, config }
    }

    pub async fn try_fetch_video_metadata(&self, url: &str) -> Result<TikTokVideoMetadata, ScrapeError> {
        if url.trim().is_empty() {
            return Err(ScrapeError::InvalidInput("video URL must not be empty".to_string()));
        }
        let info = self.extractor.extract_video(url.trim(), &self.config).await?;
        let info: TikTokInfo = serde_json::from_value(info)?;
        Ok(info.into())
    }

    /// Metadata for one video, `None` on any failure
    pub async fn fetch_video_metadata(&self, url: &str) -> Option<TikTokVideoMetadata> {
        match self.try_fetch_video_metadata(url).await {
            Ok(meta) => Some(meta),
            Err(e) => {
                error!("Failed to fetch video data: {}", e);
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeExtractor;
    use super::*;
    use crate::scraper::instagram::client::testing::FakeFetcher;
    use serde_json::json;

    fn stats_fetcher(fetcher: FakeFetcher, extractor: FakeExtractor) -> TikTokProfileStatsFetcher {
        TikTokProfileStatsFetcher::new(Box::new(fetcher), Box::new(extractor), ExtractorConfig::default())
    }

    #[test]
    fn test_follower_count_patterns() {
        assert_eq!(extract_follower_count(r#"{"followerCount":12345,"x":1}"#), Some(12345));
        assert_eq!(extract_follower_count(r#"{"followerCount": 7}"#), Some(7));
        assert_eq!(extract_follower_count(r#"<strong>1.2M</strong> Followers"#), None);
        assert_eq!(extract_follower_count(r#"<span>1.2M Followers</span>"#), None);
        assert_eq!(
            extract_follower_count("<html><div>Suggested accounts</div><p>12 Followers</p></html>"),
            None
        );
        assert_eq!(extract_follower_count("<html></html>"), None);
    }

    #[test]
    fn test_entry_url_resolution() {
        let absolute = FlatEntry {
            url: Some("https://www.tiktok.com/@a/video/1".to_string()),
            ..Default::default()
        };
        let relative = FlatEntry {
            url: Some("/@a/video/2".to_string()),
            ..Default::default()
        };
        let id_only = FlatEntry {
            id: Some("3".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_entry_url(&absolute, "a").unwrap(), "https://www.tiktok.com/@a/video/1");
        assert_eq!(resolve_entry_url(&relative, "a").unwrap(), "https://www.tiktok.com/@a/video/2");
        assert_eq!(resolve_entry_url(&id_only, "a").unwrap(), "https://www.tiktok.com/@a/video/3");
        assert!(resolve_entry_url(&FlatEntry::default(), "a").is_err());
    }

    #[tokio::test]
    async fn test_follower_count_from_page() {
        let fetcher = FakeFetcher::default().with(
            "https://www.tiktok.com/@nasa",
            Ok(r#"<script>{"stats":{"followerCount":98765}}</script>"#.to_string()),
        );
        let f = stats_fetcher(fetcher, FakeExtractor::default());
        assert_eq!(f.fetch_follower_count("nasa").await, 98765);
    }

    #[tokio::test]
    async fn test_follower_count_swallows_errors() {
        let fetcher = FakeFetcher::default().with(
            "https://www.tiktok.com/@nasa",
            Err(ScrapeError::Network("connection reset".to_string())),
        );
        let f = stats_fetcher(fetcher, FakeExtractor::default());
        assert_eq!(f.fetch_follower_count("nasa").await, 0);
        assert_eq!(f.fetch_follower_count("").await, 0);
    }

    #[tokio::test]
    async fn test_average_views_floors_the_mean() {
        let mut extractor = FakeExtractor {
            flat: Some(Ok(json!({"entries": [
                {"id": "1", "url": "https://www.tiktok.com/@nasa/video/1"},
                {"id": "2", "url": "/@nasa/video/2"},
                {"id": "3", "url": "https://www.tiktok.com/@nasa/video/3"}
            ]}))),
            ..Default::default()
        };
        extractor.videos.insert("https://www.tiktok.com/@nasa/video/1".to_string(), Ok(json!({"view_count": 10})));
        extractor.videos.insert("https://www.tiktok.com/@nasa/video/2".to_string(), Ok(json!({"view_count": 11})));
        extractor.videos.insert("https://www.tiktok.com/@nasa/video/3".to_string(), Ok(json!({"title": "no views"})));

        let f = stats_fetcher(FakeFetcher::default(), extractor);
        // (10 + 11 + 0) / 3
        assert_eq!(f.fetch_average_views("nasa", DEFAULT_MAX_VIDEOS).await, 7);
    }

    #[tokio::test]
    async fn test_average_views_empty_listing_is_zero() {
        let f = stats_fetcher(FakeFetcher::default(), FakeExtractor::default());
        assert_eq!(f.try_fetch_average_views("nasa", 20).await, Ok(0));
    }

    #[tokio::test]
    async fn test_average_views_respects_limit_and_swallows_errors() {
        let entries: Vec<_> = (0..30)
            .map(|i| json!({"url": format!("https://www.tiktok.com/@nasa/video/{}", i)}))
            .collect();
        let mut extractor = FakeExtractor {
            flat: Some(Ok(json!({ "entries": entries }))),
            ..Default::default()
        };
        for i in 0..5 {
            extractor
                .videos
                .insert(format!("https://www.tiktok.com/@nasa/video/{}", i), Ok(json!({"view_count": 100})));
        }
        let f = stats_fetcher(FakeFetcher::default(), extractor);
        assert_eq!(f.fetch_average_views("nasa", 5).await, 100);
        // Video 5 is missing, so the whole average fails
        assert_eq!(f.fetch_average_views("nasa", 6).await, 0);
    }

    #[tokio::test]
    async fn test_stats_combines_both() {
        let fetcher = FakeFetcher::default().with(
            "https://www.tiktok.com/@nasa",
            Ok(r#""followerCount":500"#.to_string()),
        );
        let f = stats_fetcher(fetcher, FakeExtractor::default());
        let stats = f.fetch_stats("@nasa").await;
        assert_eq!(
            stats,
            TikTokProfileStats {
                username: "nasa".to_string(),
                followers: 500,
                average_views: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_video_metadata_projection() {
        let url = "https://www.tiktok.com/@nasa/video/7515221269865073966";
        let mut extractor = FakeExtractor::default();
        extractor.videos.insert(
            url.to_string(),
            Ok(json!({
                "id": "7515221269865073966",
                "uploader": "nasa",
                "description": "Moon 🌕",
                "view_count": 1000,
                "like_count": 100,
                "comment_count": 10,
                "upload_date": "20250612",
                "thumbnail": "https://p16.tiktokcdn.com/x.jpg",
                "webpage_url": url,
                "formats": []
            })),
        );
        let f = TikTokVideoMetadataFetcher::new(Box::new(extractor), ExtractorConfig::default());
        let meta = f.fetch_video_metadata(url).await.unwrap();
        assert_eq!(meta.username.as_deref(), Some("nasa"));
        assert_eq!(meta.views, Some(1000));
        assert_eq!(meta.comments, Some(10));
        assert_eq!(meta.video_url.as_deref(), Some(url));
    }

    #[tokio::test]
    async fn test_video_metadata_failure_is_none() {
        let f = TikTokVideoMetadataFetcher::new(Box::new(FakeExtractor::default()), ExtractorConfig::default());
        assert_eq!(f.fetch_video_metadata("https://www.tiktok.com/@a/video/1").await, None);
        assert!(matches!(
            f.try_fetch_video_metadata(" ").await,
            Err(ScrapeError::InvalidInput(_))
        ));
    }
}
