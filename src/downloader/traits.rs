// Seams between the orchestrator, the external tool and the reporting layer

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{BatchTally, CollectionEntry, FetchOutcome, ItemKind, WorkItem};

/// Captured result of one external tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout followed by stderr, blank parts dropped
    pub fn combined(&self) -> String {
        [self.stdout.trim_end(), self.stderr.trim_end()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs the external extraction tool
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Name of the runner (for logging)
    fn name(&self) -> &str;

    /// Run the tool once with `args`, waiting until it exits and both
    /// output streams are drained.
    async fn run(&self, args: &[String]) -> Result<ToolOutput, DownloadError>;
}

/// Receives progress events from the orchestrator
pub trait BatchReporter: Send {
    fn batch_started(&mut self, _queued: usize) {}

    fn item_started(&mut self, _position: usize, _item: &WorkItem, _kind: ItemKind) {}

    fn title_resolved(&mut self, _item: &WorkItem, _title: &str) {}

    fn collection_resolved(&mut self, _item: &WorkItem, _entries: &[CollectionEntry]) {}

    fn collection_failed(&mut self, _item: &WorkItem, _error: &DownloadError) {}

    fn fetch_started(&mut self, _reference: &str, _outcome_path: &std::path::Path) {}

    fn outcome(&mut self, _item: &WorkItem, _outcome: &FetchOutcome) {}

    fn batch_finished(&mut self, _tally: &BatchTally) {}
}

/// Reporter that discards every event
#[derive(Debug, Default)]
pub struct SilentReporter;

impl BatchReporter for SilentReporter {}
