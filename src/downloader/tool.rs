// yt-dlp binary location and process execution

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;

use super::errors::DownloadError;
use super::traits::{ToolOutput, ToolRunner};

#[cfg(windows)]
const BINARY_NAME: &str = "yt-dlp.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "yt-dlp";

/// Fixed location of the tool, relative to the working directory
pub fn default_tool_path() -> PathBuf {
    Path::new("yt").join(BINARY_NAME)
}

/// Resolve the tool once at startup. A missing binary is fatal.
pub fn locate_tool(path: &Path) -> Result<PathBuf, DownloadError> {
    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if !resolved.is_file() {
        return Err(DownloadError::ToolNotFound(resolved));
    }

    tracing::debug!("[Tool] Using yt-dlp at {}", resolved.display());
    Ok(resolved)
}

/// Runs the real yt-dlp binary
pub struct YtDlpRunner {
    binary: PathBuf,
}

impl YtDlpRunner {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn program(&self) -> String {
        self.binary.display().to_string()
    }
}

#[async_trait]
impl ToolRunner for YtDlpRunner {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn run(&self, args: &[String]) -> Result<ToolOutput, DownloadError> {
        let program = self.program();
        tracing::debug!("[Tool] {} {}", program, args.join(" "));

        let mut child = TokioCommand::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DownloadError::Launch {
                program: program.clone(),
                source,
            })?;

        let mut stdout_pipe = child.stdout.take().ok_or_else(|| DownloadError::Launch {
            program: program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout not captured"),
        })?;
        let mut stderr_pipe = child.stderr.take().ok_or_else(|| DownloadError::Launch {
            program: program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stderr not captured"),
        })?;

        // Both pipes are drained while waiting so a chatty tool cannot block on a full buffer.
        let stdout_task = async move {
            let mut buf = Vec::new();
            stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
        };
        let stderr_task = async move {
            let mut buf = Vec::new();
            stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
        };

        let (status, stdout, stderr) = tokio::join!(child.wait(), stdout_task, stderr_task);
        let launch_err = |source| DownloadError::Launch {
            program: program.clone(),
            source,
        };
        let status = status.map_err(launch_err)?;
        let stdout = stdout.map_err(launch_err)?;
        let stderr = stderr.map_err(launch_err)?;

        let output = ToolOutput {
            exit_code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
        };
        tracing::debug!("[Tool] exited with {:?}", output.exit_code);
        Ok(output)
    }
}
