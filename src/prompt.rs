// Interactive queue builder: folder, URL, "add another?" until the user stops

use std::io::{BufRead, Write};
use std::path::Path;

use crate::downloader::{DownloadError, DownloadQueue, WorkItem};

/// Prompt for work items on `input`/`output`. Folders are created under
/// `root` as they are entered. End of input finishes the queue.
pub fn build_queue<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    root: &Path,
) -> Result<DownloadQueue, DownloadError> {
    let mut queue = DownloadQueue::new();

    loop {
        writeln!(
            output,
            "\n📂 Enter the folder name inside '{}' where this download should be saved:",
            root.display()
        )?;
        let Some(subfolder) = read_line(input)? else {
            break;
        };
        let target = root.join(subfolder.trim());
        std::fs::create_dir_all(&target)?;

        writeln!(output, "🎵 Enter video or playlist URL:")?;
        let Some(url) = read_line(input)? else {
            break;
        };
        if let Err(e) = queue.enqueue(WorkItem::new(url, target)) {
            writeln!(output, "⚠️ {}", e)?;
        }

        write!(output, "\n➕ Would you like to add another video/playlist? (y/n): ")?;
        output.flush()?;
        match read_line(input)? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    Ok(queue)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, DownloadError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
