// Argument vectors for every yt-dlp invocation the batch makes

use std::path::Path;

/// Line format written by collection enumeration
pub const ENTRY_TEMPLATE: &str = "%(playlist_index)s - %(title)s";

// Every builder ends with `-- <reference>` so a reference starting with `-`
// is never read as an option.

/// Print only the display title of a single item
pub fn title_query_args(reference: &str) -> Vec<String> {
    vec![
        "--no-warnings".to_string(),
        "--no-playlist".to_string(),
        "--get-title".to_string(),
        "--".to_string(),
        reference.to_string(),
    ]
}

/// Audio-only extraction of one item into `destination`
pub fn extract_args(reference: &str, destination: &Path, audio_format: &str) -> Vec<String> {
    let mut args = vec!["--no-playlist".to_string()];
    args.extend(audio_args(destination, audio_format));
    args.extend(["--".to_string(), reference.to_string()]);
    args
}

/// Enumerate collection members into `entries_file` without downloading
pub fn enumerate_args(reference: &str, entries_file: &Path) -> Vec<String> {
    vec![
        "--yes-playlist".to_string(),
        "--flat-playlist".to_string(),
        "--skip-download".to_string(),
        "--no-warnings".to_string(),
        "--print-to-file".to_string(),
        ENTRY_TEMPLATE.to_string(),
        entries_file.display().to_string(),
        "--".to_string(),
        reference.to_string(),
    ]
}

/// Audio-only extraction of the member at 1-based `position` of a collection
pub fn extract_member_args(
    reference: &str,
    position: u32,
    destination: &Path,
    audio_format: &str,
) -> Vec<String> {
    let mut args = vec![
        "--yes-playlist".to_string(),
        "--playlist-items".to_string(),
        position.to_string(),
    ];
    args.extend(audio_args(destination, audio_format));
    args.extend(["--".to_string(), reference.to_string()]);
    args
}

fn audio_args(destination: &Path, audio_format: &str) -> Vec<String> {
    vec![
        "--newline".to_string(),
        "-x".to_string(),
        "--audio-format".to_string(),
        audio_format.to_string(),
        "-o".to_string(),
        output_template(destination),
    ]
}

/// Output template that makes yt-dlp land on exactly `destination`.
///
/// The extension is left to `%(ext)s`: the post-processor swaps it for the
/// audio format, so `<dir>/<stem>.%(ext)s` ends up as `<dir>/<stem>.<fmt>`.
/// Literal `%` in the stem is escaped for the template engine.
pub fn output_template(destination: &Path) -> String {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().replace('%', "%%"))
        .unwrap_or_default();
    let file_name = format!("{}.%(ext)s", stem);
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            let parent = parent.display().to_string().replace('%', "%%");
            Path::new(&parent).join(file_name).display().to_string()
        }
        _ => file_name,
    }
}

/// Pull the 1-based position out of a member extraction argument vector
pub fn playlist_position(args: &[String]) -> Option<u32> {
    args.iter()
        .position(|a| a == "--playlist-items")
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

/// Pull the side-channel path out of an enumeration argument vector
pub fn entries_file(args: &[String]) -> Option<&str> {
    args.iter()
        .position(|a| a == "--print-to-file")
        .and_then(|i| args.get(i + 2))
        .map(|s| s.as_str())
}
