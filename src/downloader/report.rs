// Console reporter - user-facing progress lines on stdout

use std::io::Write;
use std::path::Path;

use super::diagnostics::{diagnose, summarize};
use super::errors::DownloadError;
use super::models::{BatchTally, CollectionEntry, FetchOutcome, FetchStatus, ItemKind, WorkItem};
use super::traits::BatchReporter;

/// Final line printed after every batch
pub fn summary_line(tally: &BatchTally) -> String {
    format!(
        "✅✅✅ All downloads complete! ({} succeeded, {} skipped, {} failed) ✅✅✅",
        tally.succeeded, tally.skipped, tally.failed
    )
}

pub struct ConsoleReporter {
    out: Box<dyn Write + Send>,
    /// Echo captured tool output for successful items too
    echo_tool_output: bool,
}

impl ConsoleReporter {
    pub fn stdout(echo_tool_output: bool) -> Self {
        Self::new(Box::new(std::io::stdout()), echo_tool_output)
    }

    pub fn new(out: Box<dyn Write + Send>, echo_tool_output: bool) -> Self {
        Self {
            out,
            echo_tool_output,
        }
    }

    fn line(&mut self, text: &str) {
        // A closed stdout must not abort the batch
        let _ = writeln!(self.out, "{}", text);
    }
}

impl BatchReporter for ConsoleReporter {
    fn batch_started(&mut self, queued: usize) {
        self.line(&format!("\n🚀 Starting downloads ({} queued)...\n", queued));
    }

    fn item_started(&mut self, position: usize, item: &WorkItem, kind: ItemKind) {
        self.line(&format!("🔍 [{}] Fetching info for: {}", position, item.source_reference));
        if kind == ItemKind::Collection {
            self.line(&format!(
                "📁 Detected as a playlist. Downloading to {}...",
                item.destination_folder.display()
            ));
        }
    }

    fn title_resolved(&mut self, _item: &WorkItem, title: &str) {
        self.line(&format!("📌 Title: {}", title));
    }

    fn collection_resolved(&mut self, _item: &WorkItem, entries: &[CollectionEntry]) {
        self.line(&format!("📂 {} entries found", entries.len()));
        for entry in entries {
            self.line(&format!("   {} - {}", entry.index, entry.raw_title));
        }
    }

    fn collection_failed(&mut self, item: &WorkItem, error: &DownloadError) {
        self.line(&format!(
            "❌ Could not list playlist {}: {}",
            item.source_reference,
            summarize(&error.to_string())
        ));
    }

    fn fetch_started(&mut self, _reference: &str, destination: &Path) {
        self.line(&format!("🎬 Downloading: {}", destination.display()));
    }

    fn outcome(&mut self, item: &WorkItem, outcome: &FetchOutcome) {
        match outcome.status {
            FetchStatus::Skipped => {
                self.line(&format!("✅ Skipping (already downloaded): {}\n", outcome.file_name()));
            }
            FetchStatus::Success => {
                if self.echo_tool_output {
                    if let Some(text) = &outcome.diagnostic {
                        self.line(text);
                    }
                }
                self.line(&format!("✅ Download complete: {}\n", outcome.file_name()));
            }
            FetchStatus::Failed => {
                let text = outcome.diagnostic.as_deref().unwrap_or("");
                let reason = diagnose(text);
                self.line(&format!(
                    "❌ Error processing {} ({}): {}",
                    item.source_reference,
                    reason.map(|r| r.description()).unwrap_or("unknown error"),
                    summarize(text)
                ));
                if !text.is_empty() {
                    self.line(&format!("⚠️ yt-dlp output:\n{}\n", text));
                }
                if reason.is_some_and(|r| r.is_transient()) {
                    self.line("🔁 This looks temporary. Run the batch again later to retry it.");
                }
            }
        }
    }

    fn batch_finished(&mut self, tally: &BatchTally) {
        self.line(&format!("\n{}", summary_line(tally)));
        let _ = self.out.flush();
    }
}
