// CLI InfoExtractor - uses native `yt-dlp` binary
//
// Advantages:
// - Faster than Python mode
// - No Python dependency

use async_trait::async_trait;
use tracing::{debug, warn};

use super::traits::{base_args, parse_json, ExtractRequest, ExtractorConfig, InfoExtractor};
use crate::scraper::errors::ScrapeError;
use crate::scraper::tools::{ToolManager, ToolType};
use crate::scraper::utils::run_output_with_timeout;

/// CLI-based info extractor using yt-dlp binary
pub struct CliInfoExtractor {
    ytdlp_path: String,
    available: bool,
}

impl CliInfoExtractor {
    pub fn new() -> Self {
        let ytdlp_path = ToolManager::new()
            .locate(&ToolType::YtDlp)
            .unwrap_or_else(|| "yt-dlp".to_string());
        Self::probe(ytdlp_path)
    }

    /// Runs `--version` once to record whether the binary works
    fn probe(ytdlp_path: String) -> Self {
        let available = std::process::Command::new(&ytdlp_path)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false);
        Self {
            ytdlp_path,
            available,
        }
    }
}

impl Default for CliInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for CliInfoExtractor {
    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn extract(
        &self,
        url: &str,
        request: ExtractRequest,
        config: &ExtractorConfig,
    ) -> Result<serde_json::Value, ScrapeError> {
        if !self.available {
            return Err(ScrapeError::ToolNotFound(
                "yt-dlp binary not found".to_string(),
            ));
        }

        let args = base_args(url, request, config);
        debug!(extractor = self.name(), "running {} {}", self.ytdlp_path, args.join(" "));

        let output = run_output_with_timeout(&self.ytdlp_path, args, config.process_timeout_secs())
            .await
            .map_err(ScrapeError::from)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(extractor = self.name(), "yt-dlp failed: {}", stderr);
            return Err(ScrapeError::from(stderr));
        }

        parse_json(&output.stdout)
    }
}
