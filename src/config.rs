use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::data::aggregate::TOP_GENRES;
use crate::data::export::EXPORT_FILE_NAME;
use crate::error::{Error, Result};

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "FLIXBOARD_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_ENV: &str = "FLIXBOARD_DATA";

/// Dashboard settings. Every field has a default, so an empty `{}` is a
/// valid config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dataset loaded at startup.
    pub data_path: PathBuf,
    /// Length of the genre ranking.
    pub top_genres: usize,
    /// Suggested name in the export save dialog.
    pub export_file_name: String,
    /// Time each year stays on screen during trend playback.
    pub trend_frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_path: PathBuf::from("netflix_clean.csv"),
            top_genres: TOP_GENRES,
            export_file_name: EXPORT_FILE_NAME.to_string(),
            trend_frame_ms: 800,
        }
    }
}

impl Config {
    /// Resolve the configuration: defaults, then the file named by
    /// `FLIXBOARD_CONFIG`, then `FLIXBOARD_DATA`, then `cli_data_path`.
    pub fn load(cli_data_path: Option<PathBuf>) -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Config::default(),
        };
        if let Some(path) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(path) = cli_data_path {
            config.data_path = path;
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|reason| Error::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_json(text: &str) -> std::result::Result<Self, String> {
        let config: Config = serde_json::from_str(text).map_err(|e| e.to_string())?;
        if config.top_genres == 0 {
            return Err("top_genres must be at least 1".to_string());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let config = Config::from_json(r#"{"data_path": "titles.parquet", "top_genres": 5}"#)
            .unwrap();
        assert_eq!(config.data_path, PathBuf::from("titles.parquet"));
        assert_eq!(config.top_genres, 5);
        assert_eq!(config.export_file_name, "filtered_data.csv");
    }

    #[test]
    fn rejects_unknown_keys_and_zero_top_n() {
        assert!(Config::from_json(r#"{"colour": "red"}"#).is_err());
        assert!(Config::from_json(r#"{"top_genres": 0}"#).is_err());
    }

    #[test]
    fn from_file_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }
}
