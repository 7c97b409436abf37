// Scraper module - platform fetchers over pluggable collaborators

pub mod errors;
pub mod extractors;
pub mod http;
pub mod instagram;
pub mod models;
pub mod post_urls;
pub mod reels;
pub mod tiktok;
pub mod tools;
pub mod traits;
pub mod utils;
pub mod youtube;

pub use errors::ScrapeError;
pub use extractors::{ExtractorConfig, ExtractorMode, InfoExtractor, InfoExtractorOrchestrator};
pub use http::HttpPageFetcher;
pub use models::{MediaMetadataRecord, NetworkConfig, ProfileReelsReport, ReelsOutcome};
pub use post_urls::list_recent_post_urls;
pub use reels::{OutputFormat, ReelsAnalyticsFetcher};
pub use tiktok::{TikTokProfileStatsFetcher, TikTokVideoMetadataFetcher};
pub use traits::{PageFetcher, ProfileSource, ProgressSink};
pub use youtube::YouTubeVideoMetadataFetcher;
