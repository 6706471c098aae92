// Collection resolver - enumerates playlist members through a side-channel file

use std::path::Path;

use super::errors::DownloadError;
use super::invocations::enumerate_args;
use super::models::CollectionEntry;
use super::traits::ToolRunner;

const ENTRIES_FILE: &str = "entries.txt";

/// Enumerate the members of a collection, in collection order.
///
/// The side-channel file lives in a temporary directory owned by this call
/// and removed when it returns, whether or not reading succeeded.
pub async fn resolve_collection(
    runner: &dyn ToolRunner,
    reference: &str,
) -> Result<Vec<CollectionEntry>, DownloadError> {
    let scratch = tempfile::Builder::new()
        .prefix("yt-audio-batch-")
        .tempdir()?;
    let entries_path = scratch.path().join(ENTRIES_FILE);

    let output = runner
        .run(&enumerate_args(reference, &entries_path))
        .await
        .map_err(|e| DownloadError::CollectionResolution {
            reference: reference.to_string(),
            message: e.to_string(),
        })?;

    if !entries_path.exists() {
        return Err(DownloadError::CollectionResolution {
            reference: reference.to_string(),
            message: format!(
                "no entries written (exit status {:?}): {}",
                output.exit_code,
                output.combined()
            ),
        });
    }

    if !output.success() {
        tracing::warn!(
            "[Collection] yt-dlp exited with {:?} for {}, using the entries it wrote",
            output.exit_code,
            reference
        );
    }

    let entries = read_entries(&entries_path).await?;
    if entries.is_empty() {
        return Err(DownloadError::CollectionResolution {
            reference: reference.to_string(),
            message: "collection has no entries".to_string(),
        });
    }

    tracing::info!("[Collection] {} -> {} entries", reference, entries.len());
    Ok(entries)
}

async fn read_entries(path: &Path) -> Result<Vec<CollectionEntry>, DownloadError> {
    let body = tokio::fs::read_to_string(path).await?;
    Ok(parse_entries(&body))
}

/// Parse `<index> - <title>` lines. Malformed lines are skipped; entries
/// are ordered by index.
pub fn parse_entries(body: &str) -> Vec<CollectionEntry> {
    let mut entries: Vec<CollectionEntry> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match parse_entry(line) {
            Some(entry) => Some(entry),
            None => {
                tracing::warn!("[Collection] Ignoring malformed entry line: {}", line);
                None
            }
        })
        .collect();

    entries.sort_by_key(|e| e.index);
    entries.dedup_by_key(|e| e.index);
    entries
}

fn parse_entry(line: &str) -> Option<CollectionEntry> {
    let line = line.trim_end_matches(['\r', '\n']);
    let (index, title) = line.split_once(" - ")?;
    let index: u32 = index.trim().parse().ok()?;
    if index == 0 {
        return None;
    }
    Some(CollectionEntry {
        index,
        raw_title: title.to_string(),
    })
}
