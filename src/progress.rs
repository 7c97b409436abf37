// Terminal spinner for long post iterations

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::scraper::traits::ProgressSink;

/// Spinner on stderr; indicatif hides it when stderr is not a terminal
pub struct SpinnerProgress {
    bar: ProgressBar,
    label: String,
}

impl SpinnerProgress {
    pub fn new(label: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(120));

        let label = label.into();
        bar.set_message(format!("{}: scanning posts", label));
        Self { bar, label }
    }
}

impl ProgressSink for SpinnerProgress {
    fn post_processed(&self, kept: usize) {
        self.bar.inc(1);
        self.bar.set_message(format!(
            "{}: {} reels in {} posts",
            self.label,
            kept,
            self.bar.position()
        ));
    }

    fn finish(&self, _kept: usize) {
        self.bar.finish_and_clear();
    }
}
