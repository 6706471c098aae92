// Downloader module - sequential yt-dlp audio batch

pub mod collection;
pub mod diagnostics;
pub mod errors;
pub mod fetcher;
pub mod invocations;
pub mod models;
pub mod orchestrator;
pub mod queue;
pub mod report;
pub mod sanitize;
pub mod title;
pub mod tool;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::DownloadError;
pub use models::{
    BatchResult, BatchTally, CollectionEntry, FetchOutcome, FetchSettings, FetchStatus, ItemKind,
    WorkItem, WorkItemReport,
};
pub use orchestrator::{run_batch, Orchestrator};
pub use queue::DownloadQueue;
pub use report::ConsoleReporter;
pub use tool::{default_tool_path, YtDlpRunner};
pub use traits::{BatchReporter, SilentReporter, ToolOutput, ToolRunner};
