// Queue orchestrator - drives every work item to a terminal outcome
//
// Per work item: classify -> single flow | collection flow -> done.
// Failures are recorded and the batch moves on; the run always finishes
// with a tally.

use std::path::{Path, PathBuf};

use super::collection::resolve_collection;
use super::errors::DownloadError;
use super::fetcher::{fetch_item, Selector};
use super::models::{BatchResult, FetchOutcome, FetchSettings, ItemKind, WorkItem, WorkItemReport};
use super::queue::{classify, DownloadQueue};
use super::sanitize::sanitize;
use super::title::resolve_title;
use super::tool::locate_tool;
use super::traits::{BatchReporter, ToolRunner};

pub struct Orchestrator {
    runner: Box<dyn ToolRunner>,
    settings: FetchSettings,
}

impl Orchestrator {
    pub fn new(runner: Box<dyn ToolRunner>, settings: FetchSettings) -> Self {
        Self { runner, settings }
    }

    /// Process every queued item, strictly one after another.
    pub async fn run(&self, queue: DownloadQueue, reporter: &mut dyn BatchReporter) -> BatchResult {
        tracing::info!(
            "[Orchestrator] Starting batch of {} item(s) with {}",
            queue.len(),
            self.runner.name()
        );
        reporter.batch_started(queue.len());

        let mut result = BatchResult::default();
        for (position, item) in queue.into_iter().enumerate() {
            let report = self.process(position + 1, item, reporter).await;
            if report.failed_count() > 0 {
                tracing::warn!(
                    "[Orchestrator] {} finished with {} failure(s)",
                    report.item.source_reference,
                    report.failed_count()
                );
            }
            result.push(report);
        }

        let tally = result.tally();
        tracing::info!(
            "[Orchestrator] Batch done: {} file(s), {} succeeded, {} skipped, {} failed",
            tally.total(),
            tally.succeeded,
            tally.skipped,
            tally.failed
        );
        reporter.batch_finished(&tally);
        result
    }

    async fn process(
        &self,
        position: usize,
        item: WorkItem,
        reporter: &mut dyn BatchReporter,
    ) -> WorkItemReport {
        let kind = classify(&item.source_reference);
        tracing::debug!("[Orchestrator] {} classified as {:?}", item.source_reference, kind);
        reporter.item_started(position, &item, kind);

        let outcomes = match tokio::fs::create_dir_all(&item.destination_folder).await {
            Ok(()) => match kind {
                ItemKind::Single => vec![self.single_flow(&item, reporter).await],
                ItemKind::Collection => self.collection_flow(&item, reporter).await,
            },
            Err(e) => {
                tracing::error!(
                    "[Orchestrator] Cannot create {}: {}",
                    item.destination_folder.display(),
                    e
                );
                let outcome = FetchOutcome::failed(
                    &item.destination_folder,
                    format!("cannot create folder {}: {}", item.destination_folder.display(), e),
                );
                reporter.outcome(&item, &outcome);
                vec![outcome]
            }
        };

        WorkItemReport { item, kind, outcomes }
    }

    async fn single_flow(&self, item: &WorkItem, reporter: &mut dyn BatchReporter) -> FetchOutcome {
        let raw_title = resolve_title(
            self.runner.as_ref(),
            &item.source_reference,
            &self.settings.fallback_title,
        )
        .await;
        reporter.title_resolved(item, &raw_title);

        let destination = self.destination(&item.destination_folder, &raw_title, None);
        self.fetch_unless_present(item, Selector::Whole, &destination, reporter)
            .await
    }

    async fn collection_flow(&self, item: &WorkItem, reporter: &mut dyn BatchReporter) -> Vec<FetchOutcome> {
        let entries = match resolve_collection(self.runner.as_ref(), &item.source_reference).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("[Orchestrator] {}", e);
                reporter.collection_failed(item, &e);
                let outcome = collection_failure(item, &e);
                reporter.outcome(item, &outcome);
                return vec![outcome];
            }
        };
        reporter.collection_resolved(item, &entries);

        let mut outcomes = Vec::with_capacity(entries.len());
        for entry in &entries {
            let destination =
                self.destination(&item.destination_folder, &entry.raw_title, Some(entry.index));
            let outcome = self
                .fetch_unless_present(item, Selector::Position(entry.index), &destination, reporter)
                .await;
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Skip-if-exists applies to single items and collection members alike.
    async fn fetch_unless_present(
        &self,
        item: &WorkItem,
        selector: Selector,
        destination: &Path,
        reporter: &mut dyn BatchReporter,
    ) -> FetchOutcome {
        let outcome = if destination.exists() {
            tracing::info!("[Orchestrator] Skipping existing {}", destination.display());
            FetchOutcome::skipped(destination)
        } else {
            reporter.fetch_started(&item.source_reference, destination);
            fetch_item(
                self.runner.as_ref(),
                &item.source_reference,
                selector,
                destination,
                &self.settings,
            )
            .await
        };
        reporter.outcome(item, &outcome);
        outcome
    }

    /// `<folder>/<sanitized title>.<ext>`, never with an empty title
    fn destination(&self, folder: &Path, raw_title: &str, index: Option<u32>) -> PathBuf {
        let mut title = sanitize(raw_title.trim());
        if title.is_empty() {
            title = match index {
                Some(index) => format!("{} {}", self.settings.fallback_title, index),
                None => self.settings.fallback_title.clone(),
            };
        }
        self.settings.destination_for(folder, &title)
    }
}

fn collection_failure(item: &WorkItem, error: &DownloadError) -> FetchOutcome {
    FetchOutcome::failed(&item.destination_folder, error.to_string())
}

/// Resolve the tool, then run the queue. A missing tool is returned as an
/// error before `make_runner` is called or any item is touched.
pub async fn run_batch<F>(
    tool_path: &Path,
    queue: DownloadQueue,
    settings: FetchSettings,
    reporter: &mut dyn BatchReporter,
    make_runner: F,
) -> Result<BatchResult, DownloadError>
where
    F: FnOnce(PathBuf) -> Box<dyn ToolRunner>,
{
    let binary = locate_tool(tool_path)?;
    let orchestrator = Orchestrator::new(make_runner(binary), settings);
    Ok(orchestrator.run(queue, reporter).await)
}
