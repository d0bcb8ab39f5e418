use crate::error::KwicResult;
use crate::index::types::{
    IndexConfig, WindowWidth, DEFAULT_LINE_ID_PREFIX, DEFAULT_SEPARATOR, DEFAULT_WINDOW_WIDTH,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "kwic";
const CONFIG_FILE: &str = "config.json";

/// User configuration stored in the config directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tokens per context window (odd)
    #[serde(default = "default_window_width")]
    pub window_width: usize,

    /// Character joining the tokens of multi-token terms
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Prefix marking a line identifier as the first word of a corpus line
    #[serde(default = "default_line_id_prefix")]
    pub line_id_prefix: String,

    /// Lines per shard when indexing in parallel
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Shard corpus lines across threads
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Index file used when a command is not given one
    #[serde(default = "default_index")]
    pub default_index: PathBuf,
}

fn default_window_width() -> usize {
    DEFAULT_WINDOW_WIDTH
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_line_id_prefix() -> String {
    DEFAULT_LINE_ID_PREFIX.to_string()
}

fn default_chunk_size() -> usize {
    10_000
}

fn default_parallel() -> bool {
    true
}

fn default_index() -> PathBuf {
    PathBuf::from("kwic_index.bin")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            separator: default_separator(),
            line_id_prefix: default_line_id_prefix(),
            chunk_size: default_chunk_size(),
            parallel: default_parallel(),
            default_index: default_index(),
        }
    }
}

impl AppConfig {
    /// Load config from `path`, or from the user config directory when no
    /// path is given. A missing default config file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match get_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;
        Ok(config)
    }

    /// Save config to the user config directory, returning where it went
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path().context("Could not determine config directory")?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(config_path)
    }

    /// Build settings for an index build, validating the window width
    pub fn index_config(&self) -> KwicResult<IndexConfig> {
        Ok(IndexConfig {
            width: WindowWidth::new(self.window_width)?,
            separator: self.separator,
            line_id_prefix: self.line_id_prefix.clone(),
            chunk_size: self.chunk_size,
            parallel: self.parallel,
        })
    }
}

/// Path of the config file: `<config dir>/kwic/config.json`
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KwicError;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.window_width, 11);
        assert_eq!(config.separator, '_');
        assert_eq!(config.line_id_prefix, "__");
        assert!(config.parallel);
    }

    #[test]
    fn test_app_config_partial_json() {
        let json = r#"{"window_width": 7}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.window_width, 7);
        assert_eq!(config.separator, '_');
        assert_eq!(config.chunk_size, 10_000);
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.window_width, 11);
        assert_eq!(config.default_index, PathBuf::from("kwic_index.bin"));
    }

    #[test]
    fn test_index_config_rejects_even_width() {
        let config = AppConfig {
            window_width: 8,
            ..AppConfig::default()
        };
        assert!(matches!(config.index_config(), Err(KwicError::InvalidWidth(8))));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("kwic.json");
        fs::write(&path, r#"{"separator": "+", "parallel": false}"#).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.separator, '+');
        assert!(!config.parallel);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/kwic.json"))).is_err());
    }
}
