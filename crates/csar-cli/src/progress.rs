//! Progress bar implementation for CLI operations.

use console::Term;
use csar_core::ProgressCallback;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

const DOWNLOAD_TEMPLATE: &str =
    "{msg} [{bar:40.cyan/blue}] {binary_bytes}/{binary_total_bytes} ({binary_bytes_per_sec}, {eta})";
const DOWNLOAD_UNKNOWN_TEMPLATE: &str = "{spinner} {msg} {binary_bytes} ({binary_bytes_per_sec})";
const EXTRACT_TEMPLATE: &str = "{msg} [{bar:40.cyan/blue}] {pos}/{len} entries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Downloading,
    Extracting,
}

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Shows a byte counter while a remote package downloads, then switches to
/// an entry counter for extraction. The bar is cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    phase: Phase,
}

impl CliProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            phase: Phase::Idle,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    fn restart(&mut self, bar: ProgressBar, template: &str, message: &str) {
        self.bar.finish_and_clear();
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(message.to_string());
        self.bar = bar;
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_download_start(&mut self, _url: &str, content_length: Option<u64>) {
        match content_length {
            Some(len) => self.restart(ProgressBar::new(len), DOWNLOAD_TEMPLATE, "Downloading"),
            None => {
                self.restart(ProgressBar::new_spinner(), DOWNLOAD_UNKNOWN_TEMPLATE, "Downloading");
            }
        }
        self.phase = Phase::Downloading;
    }

    fn on_bytes_downloaded(&mut self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn on_entry_start(&mut self, _path: &Path, total: usize, _current: usize) {
        if self.phase != Phase::Extracting {
            self.restart(ProgressBar::new(total as u64), EXTRACT_TEMPLATE, "Extracting");
            self.phase = Phase::Extracting;
        }
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
