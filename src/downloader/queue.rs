// Download queue and work item classification

use regex::Regex;
use serde::Deserialize;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use super::errors::DownloadError;
use super::models::{ItemKind, WorkItem};

lazy_static::lazy_static! {
    // yt-dlp addresses a playlist through the `list` query parameter
    static ref COLLECTION_RE: Regex = Regex::new(r"[?&]list=[^&#\s]+").unwrap();
}

/// Single item or collection, based on the reference shape
pub fn classify(reference: &str) -> ItemKind {
    if COLLECTION_RE.is_match(reference) {
        ItemKind::Collection
    } else {
        ItemKind::Single
    }
}

/// Ordered, explicitly owned list of pending work items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadQueue {
    items: VecDeque<WorkItem>,
}

impl DownloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a work item; blank references are rejected.
    pub fn enqueue(&mut self, item: WorkItem) -> Result<(), DownloadError> {
        let reference = item.source_reference.trim();
        if reference.is_empty() {
            return Err(DownloadError::Config(format!(
                "empty URL for folder {}",
                item.destination_folder.display()
            )));
        }

        self.items.push_back(WorkItem {
            source_reference: reference.to_string(),
            destination_folder: item.destination_folder,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkItem> {
        self.items.iter()
    }

    /// Load `[[items]]` entries from a TOML queue file; folders are
    /// resolved under `root`.
    pub fn from_toml_file(path: &Path, root: &Path) -> Result<Self, DownloadError> {
        let data = std::fs::read_to_string(path).map_err(|e| DownloadError::QueueFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&data, root).map_err(|e| match e {
            DownloadError::Config(message) => DownloadError::QueueFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(data: &str, root: &Path) -> Result<Self, DownloadError> {
        let file: QueueFile =
            toml::from_str(data).map_err(|e| DownloadError::Config(e.to_string()))?;

        let mut queue = Self::new();
        for entry in file.items {
            queue.enqueue(WorkItem::new(entry.url, root.join(entry.folder)))?;
        }
        Ok(queue)
    }
}

impl IntoIterator for DownloadQueue {
    type Item = WorkItem;
    type IntoIter = std::collections::vec_deque::IntoIter<WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Deserialize)]
struct QueueFile {
    #[serde(default)]
    items: Vec<QueueFileEntry>,
}

#[derive(Debug, Deserialize)]
struct QueueFileEntry {
    url: String,
    #[serde(default)]
    folder: PathBuf,
}
