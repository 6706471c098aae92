// Error types for the batch downloader

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp binary missing at the configured location (fatal at startup)
    #[error("yt-dlp not found at: {}", .0.display())]
    ToolNotFound(PathBuf),

    /// Title query failed; callers fall back to the default title
    #[error("could not resolve title for {reference}: {message}")]
    TitleResolution { reference: String, message: String },

    /// Collection enumeration produced no usable entries
    #[error("could not resolve collection {reference}: {message}")]
    CollectionResolution { reference: String, message: String },

    /// Extraction of a single item failed
    #[error("could not fetch {reference}: {message}")]
    ItemFetch { reference: String, message: String },

    /// Process could not be launched or waited on
    #[error("failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid queue file {}: {message}", .path.display())]
    QueueFile { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
