use crate::services::ExportFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the configuration directory when set
pub const HOME_ENV: &str = "ATTENDANCE_TUI_HOME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `students.json` and the log file
    pub data_dir: PathBuf,
    /// Directory exported sheets are written to
    pub export_dir: PathBuf,
    pub export_format: ExportFormat,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let base = Self::config_dir().unwrap_or_else(|| PathBuf::from(".attendance-tui"));
        Self::rooted_at(&base)
    }
}

impl Config {
    /// Defaults with every directory under `base`
    pub fn rooted_at(base: &Path) -> Self {
        Self {
            data_dir: base.to_path_buf(),
            export_dir: base.join("exports"),
            export_format: ExportFormat::Html,
            log_level: "info".to_string(),
            tick_rate_ms: 100,
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var(HOME_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".attendance-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Load the config, writing defaults on first run
    ///
    /// A failure to write the defaults is returned alongside them so the
    /// caller can report it once logging is up.
    pub fn load_or_init() -> (Config, Option<anyhow::Error>) {
        if let Some(config) = Self::load() {
            return (config, None);
        }

        let config = Config::default();
        let err = config.save().err();
        (config, err)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rooted_defaults() {
        let config = Config::rooted_at(Path::new("/tmp/att"));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/att"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/att/exports"));
        assert_eq!(config.export_format, ExportFormat::Html);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut config = Config::rooted_at(dir.path());
        config.export_format = ExportFormat::Csv;
        config.log_level = "debug".to_string();

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), Some(config));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "export_format": "csv" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_missing_or_corrupt_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        assert!(Config::load_from(&path).is_none());

        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_none());
    }
}
