// InfoExtractor trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::scraper::errors::ScrapeError;
use crate::scraper::models::NetworkConfig;

/// Extraction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractorMode {
    /// Python module yt_dlp
    Python,
    /// CLI binary yt-dlp
    Cli,
    /// Auto-select per URL
    #[default]
    Auto,
}

impl fmt::Display for ExtractorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Python => write!(f, "python"),
            Self::Cli => write!(f, "cli"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for ExtractorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "cli" | "binary" => Ok(Self::Cli),
            "auto" | "" => Ok(Self::Auto),
            other => Err(format!("unknown extractor mode '{}' (expected auto, python or cli)", other)),
        }
    }
}

/// Configuration for info extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Extraction mode (Python, CLI, or Auto)
    pub mode: ExtractorMode,
    /// Proxy and socket timeout
    pub network: NetworkConfig,
    /// Path to cookies.txt file
    pub cookies_path: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            mode: ExtractorMode::Auto,
            network: NetworkConfig::default(),
            cookies_path: None,
        }
    }
}

impl ExtractorConfig {
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    pub fn with_cookies_path(mut self, path: Option<String>) -> Self {
        self.cookies_path = path;
        self
    }

    pub fn with_mode(mut self, mode: ExtractorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Seconds to wait for one yt-dlp process before killing it.
    /// A flat listing or a full extraction can take several socket round-trips.
    pub fn process_timeout_secs(&self) -> u64 {
        self.network.timeout_secs() * 4
    }
}

/// What yt-dlp should produce for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractRequest {
    /// Full info dict for a single video
    Single,
    /// Metadata-light playlist listing, at most `limit` entries
    Flat { limit: usize },
}

/// One entry of a flattened listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub id: Option<String>,
    pub url: Option<String>,
}

/// Flattened playlist/profile listing from yt-dlp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatListing {
    #[serde(default)]
    pub entries: Vec<FlatEntry>,
}

/// Trait for info extractors
#[async_trait]
pub trait InfoExtractor: Send + Sync {
    /// Name of the extractor (for logging)
    fn name(&self) -> &'static str;

    /// Check if this extractor is available
    fn is_available(&self) -> bool;

    /// Extract the raw yt-dlp info dict for `url`
    async fn extract(
        &self,
        url: &str,
        request: ExtractRequest,
        config: &ExtractorConfig,
    ) -> Result<serde_json::Value, ScrapeError>;

    /// Extract full metadata for a single video
    async fn extract_video(
        &self,
        url: &str,
        config: &ExtractorConfig,
    ) -> Result<serde_json::Value, ScrapeError> {
        self.extract(url, ExtractRequest::Single, config).await
    }

    /// Extract a flattened listing (lighter operation)
    async fn extract_flat(
        &self,
        url: &str,
        limit: usize,
        config: &ExtractorConfig,
    ) -> Result<FlatListing, ScrapeError> {
        let json = self.extract(url, ExtractRequest::Flat { limit }, config).await?;
        let mut listing: FlatListing = serde_json::from_value(json)?;
        listing.entries.truncate(limit);
        Ok(listing)
    }
}

/// Build the yt-dlp arguments common to both backends
pub(crate) fn base_args(url: &str, request: ExtractRequest, config: &ExtractorConfig) -> Vec<String> {
    let mut args = vec![
        "--dump-single-json".to_string(),
        "--skip-download".to_string(),
        "--no-warnings".to_string(),
        "--quiet".to_string(),
    ];

    match request {
        ExtractRequest::Single => args.push("--no-playlist".to_string()),
        ExtractRequest::Flat { limit } => {
            args.push("--flat-playlist".to_string());
            args.push("--playlist-end".to_string());
            args.push(limit.to_string());
        }
    }

    args.extend(crate::scraper::utils::get_timeout_args(&config.network));
    args.extend(crate::scraper::utils::get_proxy_args(&config.network));

    if let Some(path) = &config.cookies_path {
        args.push("--cookies".to_string());
        args.push(path.clone());
    }

    args.push(url.to_string());
    args
}

/// Parse yt-dlp stdout into a JSON value
pub(crate) fn parse_json(stdout: &[u8]) -> Result<serde_json::Value, ScrapeError> {
    let json_str = String::from_utf8_lossy(stdout);
    serde_json::from_str(json_str.trim())
        .map_err(|e| ScrapeError::ParseError(format!("Invalid JSON from yt-dlp: {}", e)))
}

pub(crate) fn is_youtube(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.contains("youtube.com") || lower.contains("youtu.be")
}
