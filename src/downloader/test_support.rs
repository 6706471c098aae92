// Scripted yt-dlp stand-in for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::errors::DownloadError;
use super::invocations::{entries_file, playlist_position};
use super::models::audio_extension;
use super::traits::{ToolOutput, ToolRunner};

/// Shared record of every argument vector passed to the runner
pub type CallLog = Arc<Mutex<Vec<Vec<String>>>>;

/// Emulates yt-dlp: answers title queries, writes enumeration side-channel
/// files and creates output files for extractions, all from a script.
#[derive(Default)]
pub struct ScriptedRunner {
    calls: CallLog,
    titles: HashMap<String, Result<String, String>>,
    collections: HashMap<String, Option<String>>,
    fetch_failures: HashMap<(String, Option<u32>), String>,
    missing_output: bool,
    unlaunchable: bool,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title query for `reference` prints `stdout`
    pub fn with_title(mut self, reference: &str, stdout: &str) -> Self {
        self.titles.insert(reference.to_string(), Ok(stdout.to_string()));
        self
    }

    /// Title query for `reference` exits 1 with `stderr`
    pub fn with_title_failure(mut self, reference: &str, stderr: &str) -> Self {
        self.titles.insert(reference.to_string(), Err(stderr.to_string()));
        self
    }

    /// Enumeration of `reference` writes one `<index> - <title>` line per entry
    pub fn with_collection(mut self, reference: &str, entries: &[(u32, &str)]) -> Self {
        let body: String = entries
            .iter()
            .map(|(index, title)| format!("{} - {}\n", index, title))
            .collect();
        self.collections.insert(reference.to_string(), Some(body));
        self
    }

    /// Enumeration of `reference` writes `body` verbatim
    pub fn with_collection_lines(mut self, reference: &str, body: &str) -> Self {
        self.collections.insert(reference.to_string(), Some(body.to_string()));
        self
    }

    /// Enumeration of `reference` exits 1 without writing the side-channel file
    pub fn with_collection_failure(mut self, reference: &str) -> Self {
        self.collections.insert(reference.to_string(), None);
        self
    }

    /// Extraction of `reference` exits 1 with `stderr`
    pub fn with_fetch_failure(mut self, reference: &str, stderr: &str) -> Self {
        self.fetch_failures
            .insert((reference.to_string(), None), stderr.to_string());
        self
    }

    /// Extraction of member `position` of `reference` exits 1 with `stderr`
    pub fn with_member_failure(mut self, reference: &str, position: u32, stderr: &str) -> Self {
        self.fetch_failures
            .insert((reference.to_string(), Some(position)), stderr.to_string());
        self
    }

    /// Extractions exit 0 without producing a file
    pub fn without_output_files(mut self) -> Self {
        self.missing_output = true;
        self
    }

    /// Every invocation fails to launch
    pub fn unlaunchable(mut self) -> Self {
        self.unlaunchable = true;
        self
    }

    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// (reference, playlist position) of every extraction, in call order
    pub fn extractions(&self) -> Vec<(String, Option<u32>)> {
        extractions(&self.calls())
    }

    fn exit(code: i32, stdout: &str, stderr: &str) -> ToolOutput {
        ToolOutput {
            exit_code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    fn answer_title(&self, reference: &str) -> ToolOutput {
        match self.titles.get(reference) {
            Some(Ok(stdout)) => Self::exit(0, stdout, ""),
            Some(Err(stderr)) => Self::exit(1, "", stderr),
            None => Self::exit(1, "", "ERROR: Unsupported URL"),
        }
    }

    fn answer_enumeration(&self, reference: &str, args: &[String]) -> ToolOutput {
        match (self.collections.get(reference), entries_file(args)) {
            (Some(Some(body)), Some(path)) => {
                std::fs::write(path, body).unwrap();
                Self::exit(0, "", "")
            }
            _ => Self::exit(1, "", "ERROR: The playlist does not exist"),
        }
    }

    fn answer_extraction(&self, reference: &str, args: &[String]) -> ToolOutput {
        let position = playlist_position(args);
        if let Some(stderr) = self.fetch_failures.get(&(reference.to_string(), position)) {
            return Self::exit(1, "[youtube] Extracting URL\n", stderr);
        }
        if self.missing_output {
            return Self::exit(0, "[download] nothing written\n", "");
        }

        let format = value_after(args, "--audio-format").unwrap_or("mp3");
        let template = value_after(args, "-o").unwrap_or_default();
        let path = PathBuf::from(
            template
                .replace("%(ext)s", audio_extension(format))
                .replace("%%", "%"),
        );
        std::fs::write(&path, b"audio").unwrap();
        Self::exit(
            0,
            &format!("[ExtractAudio] Destination: {}\n", path.display()),
            "",
        )
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

/// (reference, playlist position) of every extraction in `calls`
pub fn extractions(calls: &[Vec<String>]) -> Vec<(String, Option<u32>)> {
    calls
        .iter()
        .filter(|args| args.iter().any(|a| a == "-x"))
        .map(|args| (args.last().cloned().unwrap_or_default(), playlist_position(args)))
        .collect()
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn run(&self, args: &[String]) -> Result<ToolOutput, DownloadError> {
        self.calls.lock().unwrap().push(args.to_vec());

        if self.unlaunchable {
            return Err(DownloadError::Launch {
                program: "yt-dlp".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            });
        }

        let reference = args.last().cloned().unwrap_or_default();
        let output = if args.iter().any(|a| a == "--get-title") {
            self.answer_title(&reference)
        } else if args.iter().any(|a| a == "--print-to-file") {
            self.answer_enumeration(&reference, args)
        } else {
            self.answer_extraction(&reference, args)
        };
        Ok(output)
    }
}
