// YouTube single-video metadata

use tracing::{error, info};

use super::errors::ScrapeError;
use super::extractors::{ExtractorConfig, InfoExtractor};
use super::models::YouTubeVideoMetadata;

pub struct YouTubeVideoMetadataFetcher {
    extractor: Box<dyn InfoExtractor>,
    config: ExtractorConfig,
}

impl YouTubeVideoMetadataFetcher {
    pub fn new(extractor: Box<dyn InfoExtractor>, config: ExtractorConfig) -> Self {
        Self { extractor, config }
    }

    pub async fn try_fetch_video_metadata(&self, url: &str) -> Result<YouTubeVideoMetadata, ScrapeError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ScrapeError::InvalidInput("video URL must not be empty".to_string()));
        }
        info!(extractor = self.extractor.name(), url, "extracting YouTube metadata");
        let info = self.extractor.extract_video(url, &self.config).await?;
        // yt-dlp key names match the projection, everything else is dropped
        Ok(serde_json::from_value(info)?)
    }

    /// Metadata for one video or short, `None` on any failure
    pub async fn fetch_video_metadata(&self, url: &str) -> Option<YouTubeVideoMetadata> {
        self.try_fetch_video_metadata(url)
            .await
            .map_err(|e| error!("Failed to fetch video data: {}", e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::models::Metric;
    use crate::scraper::tiktok::testing::FakeExtractor;
    use serde_json::json;

    const URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn fetcher_with(info: Result<serde_json::Value, ScrapeError>) -> YouTubeVideoMetadataFetcher {
        let mut extractor = FakeExtractor::default();
        extractor.videos.insert(URL.to_string(), info);
        YouTubeVideoMetadataFetcher::new(Box::new(extractor), ExtractorConfig::default())
    }

    #[tokio::test]
    async fn test_projects_allow_listed_fields() {
        let f = fetcher_with(Ok(json!({
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "channel_id": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "upload_date": "20091025",
            "duration": 212,
            "view_count": 1_500_000_000u64,
            "like_count": 17_000_000,
            "comment_count": null,
            "categories": ["Music"],
            "tags": ["rick astley", "never gonna give you up"],
            "webpage_url": URL,
            "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
            "formats": [{"format_id": "18"}],
            "http_headers": {}
        })));

        let meta = f.fetch_video_metadata(URL).await.unwrap();
        assert_eq!(meta.id.as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(meta.duration, Some(212.0));
        assert_eq!(meta.comment_count, None);
        assert_eq!(meta.description, None);
        assert_eq!(meta.categories, Some(vec!["Music".to_string()]));

        let record = meta.to_record(URL);
        assert!(record.is_successful());
        assert_eq!(record.metrics.get(&Metric::ViewCount), Some(&1_500_000_000));
        assert_eq!(record.fields.get("channelId"), Some(&json!("UCuAXFkgsw1L7xaCfnd5JJOw")));
    }

    #[tokio::test]
    async fn test_failure_is_none() {
        let f = fetcher_with(Err(ScrapeError::VideoUnavailable("Video unavailable".to_string())));
        assert_eq!(f.fetch_video_metadata(URL).await, None);
        assert_eq!(f.fetch_video_metadata("").await, None);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_parse_error() {
        let f = fetcher_with(Ok(json!({"id": 42})));
        assert!(matches!(
            f.try_fetch_video_metadata(URL).await,
            Err(ScrapeError::ParseError(_))
        ));
    }
}
