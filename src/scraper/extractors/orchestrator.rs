// InfoExtractor Orchestrator - picks one yt-dlp backend per call
//
// Strategy:
// 1. Explicit mode: that backend only
// 2. Auto: Python module for YouTube, binary for other sites,
//    the other one only when the preferred backend is not installed
// 3. One attempt per call; a failure is returned as-is

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::cli::CliInfoExtractor;
use super::diagnostics::diagnose_error;
use super::python::PythonInfoExtractor;
use super::traits::{is_youtube, ExtractRequest, ExtractorConfig, ExtractorMode, InfoExtractor};
use crate::scraper::errors::ScrapeError;

/// Orchestrator that manages Python and CLI extractors
pub struct InfoExtractorOrchestrator {
    python: Box<dyn InfoExtractor>,
    cli: Box<dyn InfoExtractor>,
    status: OrchestratorStatus,
}

impl InfoExtractorOrchestrator {
    pub fn new() -> Self {
        Self::with_backends(Box::new(PythonInfoExtractor::new()), Box::new(CliInfoExtractor::new()))
    }

    /// Build from explicit backends. Availability is read once, here.
    pub fn with_backends(python: Box<dyn InfoExtractor>, cli: Box<dyn InfoExtractor>) -> Self {
        let status = OrchestratorStatus {
            python_available: python.is_available(),
            cli_available: cli.is_available(),
        };
        Self { python, cli, status }
    }

    fn backend(&self, mode: ExtractorMode) -> Option<&dyn InfoExtractor> {
        match mode {
            ExtractorMode::Python if self.status.python_available => Some(self.python.as_ref()),
            ExtractorMode::Cli if self.status.cli_available => Some(self.cli.as_ref()),
            _ => None,
        }
    }

    /// The single backend that will handle `url`
    fn select(&self, url: &str, mode: ExtractorMode) -> Result<(ExtractorMode, &dyn InfoExtractor), ScrapeError> {
        let (preferred, other) = match mode {
            ExtractorMode::Python => (ExtractorMode::Python, None),
            ExtractorMode::Cli => (ExtractorMode::Cli, None),
            ExtractorMode::Auto if is_youtube(url) => (ExtractorMode::Python, Some(ExtractorMode::Cli)),
            ExtractorMode::Auto => (ExtractorMode::Cli, Some(ExtractorMode::Python)),
        };

        if let Some(backend) = self.backend(preferred) {
            return Ok((preferred, backend));
        }
        if let Some(other) = other {
            if let Some(backend) = self.backend(other) {
                debug!(preferred = %preferred, "preferred extractor not installed");
                return Ok((other, backend));
            }
        }

        Err(ScrapeError::ToolNotFound(match mode {
            ExtractorMode::Python => "Python yt_dlp module not installed (pip3 install yt-dlp)".to_string(),
            ExtractorMode::Cli => "yt-dlp binary not found".to_string(),
            ExtractorMode::Auto => {
                "Neither Python yt_dlp nor yt-dlp binary available (pip3 install yt-dlp)".to_string()
            }
        }))
    }

    /// Get availability status
    pub fn get_status(&self) -> OrchestratorStatus {
        self.status.clone()
    }
}

impl Default for InfoExtractorOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoExtractor for InfoExtractorOrchestrator {
    fn name(&self) -> &'static str {
        "orchestrator"
    }

    fn is_available(&self) -> bool {
        self.status.python_available || self.status.cli_available
    }

    async fn extract(
        &self,
        url: &str,
        request: ExtractRequest,
        config: &ExtractorConfig,
    ) -> Result<serde_json::Value, ScrapeError> {
        let (mode, backend) = self.select(url, config.mode)?;
        debug!(mode = %mode, backend = backend.name(), url, "running extractor");

        backend.extract(url, request, config).await.map_err(|e| {
            let reason = diagnose_error(&e.to_string());
            warn!(
                mode = %mode,
                reason = reason.map(|r| r.description()).unwrap_or("Unknown failure"),
                "extractor failed: {}",
                e
            );
            if let Some(hint) = reason.and_then(|r| r.hint()) {
                info!("{}", hint);
            }
            e
        })
    }
}

/// Status of the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorStatus {
    pub python_available: bool,
    pub cli_available: bool,
}
