// Failure diagnostics - classifies captured yt-dlp output
//
// Used to tag failure lines with a short reason; the raw output is always
// reported alongside it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Timeouts, refused connections, DNS failures
    Network,

    /// HTTP 429 or explicit throttling
    RateLimited,

    /// Deleted, removed or otherwise gone
    Unavailable,

    /// Private video
    Private,

    /// Not available in this country
    GeoBlocked,

    /// Needs a signed-in account
    AgeRestricted,

    /// yt-dlp has no extractor for the URL
    UnsupportedUrl,

    /// Download worked but audio conversion failed (usually ffmpeg)
    PostProcessing,

    /// Tool could not be started at all
    Launch,

    Unknown,
}

impl FailureReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::RateLimited => "rate limited",
            Self::Unavailable => "video unavailable",
            Self::Private => "private video",
            Self::GeoBlocked => "not available in this country",
            Self::AgeRestricted => "age-restricted",
            Self::UnsupportedUrl => "unsupported URL",
            Self::PostProcessing => "audio conversion failed (is ffmpeg installed?)",
            Self::Launch => "yt-dlp could not be started",
            Self::Unknown => "unknown error",
        }
    }

    /// Whether running the batch again later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network | Self::RateLimited)
    }
}

/// Analyze captured output; `None` for blank input
pub fn diagnose(output: &str) -> Option<FailureReason> {
    if output.trim().is_empty() {
        return None;
    }

    let lower = output.to_lowercase();

    if lower.contains("failed to run") || lower.contains("no such file or directory") {
        return Some(FailureReason::Launch);
    }

    if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        return Some(FailureReason::UnsupportedUrl);
    }

    if lower.contains("private video") || lower.contains("video is private") {
        return Some(FailureReason::Private);
    }

    if lower.contains("sign in to confirm your age") || lower.contains("age-restricted") {
        return Some(FailureReason::AgeRestricted);
    }

    if lower.contains("not available in your country") || lower.contains("geo restrict") {
        return Some(FailureReason::GeoBlocked);
    }

    if lower.contains("video unavailable")
        || lower.contains("has been removed")
        || lower.contains("no longer available")
        || lower.contains("does not exist")
    {
        return Some(FailureReason::Unavailable);
    }

    if lower.contains("429") || lower.contains("too many requests") || lower.contains("rate limit") {
        return Some(FailureReason::RateLimited);
    }

    if lower.contains("postprocessing")
        || lower.contains("ffmpeg not found")
        || lower.contains("ffprobe and ffmpeg not found")
    {
        return Some(FailureReason::PostProcessing);
    }

    if lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connection refused")
        || lower.contains("connection reset")
        || lower.contains("name or service not known")
        || lower.contains("getaddrinfo failed")
        || lower.contains("network is unreachable")
    {
        return Some(FailureReason::Network);
    }

    Some(FailureReason::Unknown)
}

/// First few `ERROR:` lines, or the last non-empty line
pub fn summarize(output: &str) -> String {
    let errors: Vec<&str> = output
        .lines()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("ERROR:"))
        .take(2)
        .collect();

    if !errors.is_empty() {
        return errors.join(" | ");
    }

    output
        .lines()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .unwrap_or("no output")
        .chars()
        .take(200)
        .collect()
}
