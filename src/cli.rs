//! Command-line front end: builds the queue, then hands it to the orchestrator.

use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;

use yt_audio_batch::config::{self, Config};
use yt_audio_batch::downloader::{
    run_batch, ConsoleReporter, DownloadError, DownloadQueue, ToolRunner, WorkItem, YtDlpRunner,
};
use yt_audio_batch::prompt;

/// Extract audio from video and playlist URLs with yt-dlp.
#[derive(Debug, Parser)]
#[command(name = "yt-audio-batch", version)]
#[command(about = "Batch audio extraction from video and playlist URLs via yt-dlp", long_about = None)]
pub struct Cli {
    /// Video or playlist URLs. Without URLs or --queue, prompts interactively.
    pub urls: Vec<String>,

    /// Folder under the root directory for the URLs given on the command line.
    #[arg(short, long, default_value = "")]
    pub folder: String,

    /// TOML queue file with [[items]] url/folder entries.
    #[arg(short, long, value_name = "FILE", conflicts_with = "urls")]
    pub queue: Option<PathBuf>,

    /// Config file (default: <config dir>/yt-audio-batch/config.toml).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the yt-dlp binary.
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Root directory for all destination folders.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Audio format passed to yt-dlp (mp3, m4a, opus, ...).
    #[arg(long, value_name = "FORMAT")]
    pub audio_format: Option<String>,

    /// Write the batch result as JSON to this file.
    #[arg(long, value_name = "FILE")]
    pub report_json: Option<PathBuf>,

    /// Debug logging and yt-dlp output for every item.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file values with command-line overrides applied
    pub fn effective_config(&self) -> Result<Config, DownloadError> {
        let mut cfg = config::load(self.config.as_deref())?;
        if let Some(tool) = &self.tool {
            cfg.tool_path = tool.clone();
        }
        if let Some(root) = &self.root {
            cfg.root_dir = root.clone();
        }
        if let Some(format) = &self.audio_format {
            cfg.audio_format = format.to_lowercase();
        }
        if self.verbose {
            cfg.echo_tool_output = true;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Queue from the command line, the queue file, or the interactive prompt
    pub fn build_queue<R: BufRead>(&self, cfg: &Config, input: &mut R) -> Result<DownloadQueue, DownloadError> {
        if let Some(path) = &self.queue {
            return DownloadQueue::from_toml_file(path, &cfg.root_dir);
        }

        if self.urls.is_empty() {
            return prompt::build_queue(input, &mut io::stdout(), &cfg.root_dir);
        }

        let folder = cfg.root_dir.join(&self.folder);
        let mut queue = DownloadQueue::new();
        for url in &self.urls {
            queue.enqueue(WorkItem::new(url.clone(), folder.clone()))?;
        }
        Ok(queue)
    }

    pub async fn run(self) -> Result<(), DownloadError> {
        let cfg = self.effective_config()?;
        let queue = self.build_queue(&cfg, &mut io::stdin().lock())?;

        if queue.is_empty() {
            println!("Nothing to download.");
            return Ok(());
        }

        let mut reporter = ConsoleReporter::stdout(cfg.echo_tool_output);
        let result = run_batch(
            &cfg.tool_path,
            queue,
            cfg.fetch_settings(),
            &mut reporter,
            |binary| Box::new(YtDlpRunner::new(binary)) as Box<dyn ToolRunner>,
        )
        .await?;

        if let Some(path) = &self.report_json {
            result.write_json(path)?;
            tracing::info!("Batch report written to {}", path.display());
        }
        Ok(())
    }
}
