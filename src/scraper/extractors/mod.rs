// yt-dlp metadata extraction, the generic collaborator behind the TikTok
// and YouTube fetchers.
//
// Two backends run the same `--dump-single-json` invocation: the yt-dlp
// binary and `python3 -m yt_dlp`. The orchestrator picks one per call and
// makes a single attempt.

mod cli;
mod diagnostics;
mod orchestrator;
mod python;
mod traits;

pub use cli::CliInfoExtractor;
pub use diagnostics::{diagnose_error, BlockingReason};
pub use orchestrator::{InfoExtractorOrchestrator, OrchestratorStatus};
pub use python::PythonInfoExtractor;
pub use traits::{ExtractRequest, ExtractorConfig, ExtractorMode, FlatEntry, FlatListing, InfoExtractor};
