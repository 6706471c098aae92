// Item fetcher - one audio extraction per call, never raises

use std::path::Path;

use super::diagnostics::{diagnose, summarize};
use super::errors::DownloadError;
use super::invocations::{extract_args, extract_member_args};
use super::models::{FetchOutcome, FetchSettings};
use super::traits::{ToolOutput, ToolRunner};

/// Which item of a reference to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// The reference is a single item
    Whole,
    /// 1-based member of a collection reference
    Position(u32),
}

/// Extract the audio of `reference` into exactly `destination`.
///
/// Launch errors, non-zero exits and a missing output file all become a
/// `Failed` outcome carrying the captured text.
pub async fn fetch_item(
    runner: &dyn ToolRunner,
    reference: &str,
    selector: Selector,
    destination: &Path,
    settings: &FetchSettings,
) -> FetchOutcome {
    let args = match selector {
        Selector::Whole => extract_args(reference, destination, &settings.audio_format),
        Selector::Position(position) => {
            extract_member_args(reference, position, destination, &settings.audio_format)
        }
    };

    let result = runner
        .run(&args)
        .await
        .and_then(|output| verify(reference, destination, output));

    match result {
        Ok(output) => {
            tracing::info!("[Fetch] Saved {}", destination.display());
            let captured = output.combined();
            FetchOutcome::success(destination, (!captured.is_empty()).then_some(captured))
        }
        Err(e) => {
            let text = e.to_string();
            let reason = diagnose(&text)
                .map(|r| r.description())
                .unwrap_or("unknown error");
            tracing::error!("[Fetch] {} ({}): {}", reference, reason, summarize(&text));
            FetchOutcome::failed(destination, text)
        }
    }
}

fn verify(reference: &str, destination: &Path, output: ToolOutput) -> Result<ToolOutput, DownloadError> {
    if !output.success() {
        return Err(DownloadError::ItemFetch {
            reference: reference.to_string(),
            message: format!("exit status {:?}\n{}", output.exit_code, output.combined()),
        });
    }

    if !destination.is_file() {
        return Err(DownloadError::ItemFetch {
            reference: reference.to_string(),
            message: format!(
                "yt-dlp exited successfully but {} was not produced\n{}",
                destination.display(),
                output.combined()
            ),
        });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::models::FetchStatus;
    use crate::downloader::test_support::ScriptedRunner;

    #[tokio::test]
    async fn test_success_creates_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("My Song_ Live_.mp3");
        let runner = ScriptedRunner::new();

        let outcome = fetch_item(&runner, "https://video/abc", Selector::Whole, &dest, &FetchSettings::default()).await;

        assert_eq!(outcome.status, FetchStatus::Success);
        assert_eq!(outcome.destination_path, dest);
        assert!(dest.is_file());
        assert!(outcome.diagnostic.unwrap().contains("[ExtractAudio]"));
        assert_eq!(runner.extractions(), vec![("https://video/abc".to_string(), None)]);
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failed_with_output() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.mp3");
        let runner = ScriptedRunner::new().with_fetch_failure("https://video/bad", "ERROR: Video unavailable");

        let outcome = fetch_item(&runner, "https://video/bad", Selector::Whole, &dest, &FetchSettings::default()).await;

        assert_eq!(outcome.status, FetchStatus::Failed);
        let diagnostic = outcome.diagnostic.unwrap();
        assert!(diagnostic.contains("ERROR: Video unavailable"));
        assert!(diagnostic.contains("[youtube] Extracting URL"));
    }

    #[tokio::test]
    async fn test_missing_file_after_success_is_failed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.mp3");
        let runner = ScriptedRunner::new().without_output_files();

        let outcome = fetch_item(&runner, "https://video/abc", Selector::Whole, &dest, &FetchSettings::default()).await;

        assert!(outcome.is_failed());
        assert!(outcome.diagnostic.unwrap().contains("was not produced"));
    }

    #[tokio::test]
    async fn test_launch_error_is_failed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("x.mp3");
        let runner = ScriptedRunner::new().unlaunchable();

        let outcome = fetch_item(&runner, "https://video/abc", Selector::Whole, &dest, &FetchSettings::default()).await;

        assert!(outcome.is_failed());
        assert!(outcome.diagnostic.unwrap().contains("failed to run"));
    }

    #[tokio::test]
    async fn test_position_selector_is_passed() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("Outro.mp3");
        let runner = ScriptedRunner::new();
        let playlist = "https://video/playlist?list=PL1";

        let outcome = fetch_item(&runner, playlist, Selector::Position(2), &dest, &FetchSettings::default()).await;

        assert_eq!(outcome.status, FetchStatus::Success);
        assert_eq!(runner.extractions(), vec![(playlist.to_string(), Some(2))]);
    }
}
