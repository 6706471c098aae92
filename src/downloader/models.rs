// Common data models for the batch downloader

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One queued (source reference, destination folder) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub source_reference: String,
    pub destination_folder: PathBuf,
}

impl WorkItem {
    pub fn new(source_reference: impl Into<String>, destination_folder: impl Into<PathBuf>) -> Self {
        Self {
            source_reference: source_reference.into(),
            destination_folder: destination_folder.into(),
        }
    }
}

/// How a work item is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Single,
    Collection,
}

/// One member of a resolved collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// 1-based position inside the collection
    pub index: u32,
    pub raw_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Skipped,
    Failed,
}

/// Terminal record for one attempted download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub destination_path: PathBuf,
    pub status: FetchStatus,
    /// Captured tool output or error text
    pub diagnostic: Option<String>,
}

impl FetchOutcome {
    pub fn success(destination_path: impl Into<PathBuf>, diagnostic: Option<String>) -> Self {
        Self {
            destination_path: destination_path.into(),
            status: FetchStatus::Success,
            diagnostic,
        }
    }

    pub fn skipped(destination_path: impl Into<PathBuf>) -> Self {
        Self {
            destination_path: destination_path.into(),
            status: FetchStatus::Skipped,
            diagnostic: None,
        }
    }

    pub fn failed(destination_path: impl Into<PathBuf>, diagnostic: impl Into<String>) -> Self {
        Self {
            destination_path: destination_path.into(),
            status: FetchStatus::Failed,
            diagnostic: Some(diagnostic.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == FetchStatus::Failed
    }

    pub fn file_name(&self) -> String {
        self.destination_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.destination_path.display().to_string())
    }
}

/// Everything recorded for one work item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItemReport {
    pub item: WorkItem,
    pub kind: ItemKind,
    pub outcomes: Vec<FetchOutcome>,
}

impl WorkItemReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }
}

/// Counts over every outcome of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTally {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchTally {
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

/// Ordered result of one batch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub items: Vec<WorkItemReport>,
}

impl BatchResult {
    pub fn push(&mut self, report: WorkItemReport) {
        self.items.push(report);
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &FetchOutcome> {
        self.items.iter().flat_map(|r| r.outcomes.iter())
    }

    pub fn tally(&self) -> BatchTally {
        self.outcomes().fold(BatchTally::default(), |mut tally, outcome| {
            match outcome.status {
                FetchStatus::Success => tally.succeeded += 1,
                FetchStatus::Skipped => tally.skipped += 1,
                FetchStatus::Failed => tally.failed += 1,
            }
            tally
        })
    }

    /// Write the result as pretty JSON
    pub fn write_json(&self, path: &Path) -> Result<(), crate::downloader::DownloadError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Extension yt-dlp gives a file converted with `--audio-format <format>`.
/// AAC and ALAC land in an MP4 container, Vorbis in Ogg.
pub fn audio_extension(format: &str) -> &str {
    match format {
        "aac" | "alac" => "m4a",
        "vorbis" => "ogg",
        other => other,
    }
}

/// Audio extraction parameters shared by every fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Value passed to `--audio-format`
    pub audio_format: String,
    /// Title used when the tool cannot report one
    pub fallback_title: String,
}

impl FetchSettings {
    /// File extension of the produced audio files
    pub fn extension(&self) -> &str {
        audio_extension(&self.audio_format)
    }

    /// `<folder>/<title>.<ext>` for an already sanitized title
    pub fn destination_for(&self, folder: &Path, sanitized_title: &str) -> PathBuf {
        folder.join(format!("{}.{}", sanitized_title, self.extension()))
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            audio_format: "mp3".to_string(),
            fallback_title: "video".to_string(),
        }
    }
}
