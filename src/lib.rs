pub mod config;
pub mod downloader;
pub mod logging;
pub mod prompt;

pub use downloader::{run_batch, BatchResult, DownloadError, DownloadQueue, Orchestrator, WorkItem};
