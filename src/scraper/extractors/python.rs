// Python InfoExtractor - uses `python3 -m yt_dlp`
//
// Advantages:
// - Works well with cookies/auth
//
// Disadvantages:
// - Requires Python 3 and yt-dlp module
// - Slightly slower than native binary

use async_trait::async_trait;
use tracing::debug;

use super::traits::{base_args, parse_json, ExtractRequest, ExtractorConfig, InfoExtractor};
use crate::scraper::errors::ScrapeError;
use crate::scraper::tools::{ToolManager, ToolType};
use crate::scraper::utils::run_output_with_timeout;

/// Python-based info extractor using yt_dlp module
pub struct PythonInfoExtractor {
    python_cmd: String,
    available: bool,
}

impl PythonInfoExtractor {
    pub fn new() -> Self {
        let python_cmd = ToolManager::new()
            .locate(&ToolType::Python)
            .unwrap_or_else(|| "python3".to_string());
        let available = ToolManager::python_has_module(&python_cmd, "yt_dlp");
        Self {
            python_cmd,
            available,
        }
    }

    /// Build command arguments
    fn build_args(&self, url: &str, request: ExtractRequest, config: &ExtractorConfig) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "yt_dlp".to_string()];
        args.extend(base_args(url, request, config));
        args
    }
}

impl Default for PythonInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for PythonInfoExtractor {
    fn name(&self) -> &'static str {
        "python-yt-dlp"
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
                "Python yt_dlp module not installed".to_string(),
            ));
        }

        let args = self.build_args(url, request, config);
        debug!(extractor = self.name(), "running {} {}", self.python_cmd, args.join(" "));

        let output = run_output_with_timeout(&self.python_cmd, args, config.process_timeout_secs())
            .await
            .map_err(ScrapeError::from)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScrapeError::from(stderr.trim().to_string()));
        }

        parse_json(&output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_invocation_args() {
        let extractor = PythonInfoExtractor {
            python_cmd: "python3".to_string(),
            available: true,
        };
        let args = extractor.build_args(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            ExtractRequest::Single,
            &ExtractorConfig::default(),
        );
        assert_eq!(&args[..2], &["-m".to_string(), "yt_dlp".to_string()]);
        assert!(!args.iter().any(|a| a == "--extractor-args"));
        assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[tokio::test]
    async fn test_missing_module_is_tool_not_found() {
        let extractor = PythonInfoExtractor {
            python_cmd: "python3".to_string(),
            available: false,
        };
        let err = extractor
            .extract("https://youtu.be/x", ExtractRequest::Single, &ExtractorConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::ToolNotFound(_)));
    }
}
