// Configuration loaded from config.toml, overridable from the command line

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::tool::default_tool_path;
use crate::downloader::{DownloadError, FetchSettings};

/// Formats yt-dlp can convert extracted audio into
pub const AUDIO_FORMATS: &[&str] = &["aac", "alac", "flac", "m4a", "mp3", "opus", "vorbis", "wav"];

const APP_DIR: &str = "yt-audio-batch";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// yt-dlp binary, relative paths resolve against the working directory
    pub tool_path: PathBuf,
    /// Parent of every destination folder
    pub root_dir: PathBuf,
    /// Passed to `--audio-format`
    pub audio_format: String,
    /// Print yt-dlp output for successful downloads too
    pub echo_tool_output: bool,
    /// File name used when a title cannot be resolved
    pub fallback_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool_path: default_tool_path(),
            root_dir: PathBuf::from("canciones"),
            audio_format: "mp3".to_string(),
            echo_tool_output: false,
            fallback_title: "video".to_string(),
        }
    }
}

impl Config {
    /// Reject values the batch cannot work with
    pub fn validate(&self) -> Result<(), DownloadError> {
        if !AUDIO_FORMATS.contains(&self.audio_format.as_str()) {
            return Err(DownloadError::Config(format!(
                "unsupported audio_format '{}' (expected one of: {})",
                self.audio_format,
                AUDIO_FORMATS.join(", ")
            )));
        }
        if self.fallback_title.trim().is_empty() {
            return Err(DownloadError::Config("fallback_title must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            audio_format: self.audio_format.clone(),
            fallback_title: crate::downloader::sanitize::sanitize(self.fallback_title.trim()),
        }
    }
}

/// `<config dir>/yt-audio-batch/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Load from `explicit` (must exist), else from the default location if
/// present, else defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, DownloadError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("[Config] No config file, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let data = fs::read_to_string(&path)
        .map_err(|e| DownloadError::Config(format!("{}: {}", path.display(), e)))?;
    let cfg = parse(&data).map_err(|e| match e {
        DownloadError::Config(msg) => DownloadError::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    tracing::info!("[Config] Loaded {}", path.display());
    Ok(cfg)
}

pub fn parse(data: &str) -> Result<Config, DownloadError> {
    toml::from_str(data).map_err(|e| DownloadError::Config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Config::default();
        assert_eq!(cfg.root_dir, PathBuf::from("canciones"));
        assert_eq!(cfg.audio_format, "mp3");
        assert_eq!(cfg.fallback_title, "video");
        assert!(cfg.tool_path.starts_with("yt"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_partial_values() {
        let cfg = parse(
            r#"
            root_dir = "music"
            audio_format = "opus"
        "#,
        )
        .unwrap();
        assert_eq!(cfg.root_dir, PathBuf::from("music"));
        assert_eq!(cfg.audio_format, "opus");
        assert_eq!(cfg.fallback_title, "video");
        assert!(!cfg.echo_tool_output);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = Config::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse(&toml).unwrap(), cfg);
    }

    #[test]
    fn unsupported_audio_format_is_rejected() {
        let cfg = Config {
            audio_format: "best".to_string(),
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(DownloadError::Config(_))));
    }

    #[test]
    fn every_listed_audio_format_is_accepted() {
        for format in AUDIO_FORMATS {
            let cfg = Config {
                audio_format: format.to_string(),
                ..Config::default()
            };
            assert!(cfg.validate().is_ok(), "format {}", format);
            let settings = cfg.fetch_settings();
            assert!(
                !["aac", "alac", "vorbis"].contains(&settings.extension()),
                "format {} has no file extension of its own",
                format
            );
        }
    }

    #[test]
    fn fallback_title_is_sanitized() {
        let cfg = Config {
            fallback_title: "no: title".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.fetch_settings().fallback_title, "no_ title");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "echo_tool_output = true\n").unwrap();
        let cfg = load(Some(&path)).unwrap();
        assert!(cfg.echo_tool_output);
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "audio_format = [").unwrap();
        let err = load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
