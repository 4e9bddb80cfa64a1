//! Search configuration (`config.json`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding the decoded stat files
    #[serde(alias = "statDirectory")]
    pub stat_directory: PathBuf,
    /// CSV of character aliases, one character per row
    #[serde(default = "default_character_table", alias = "characterTable")]
    pub character_table: PathBuf,
    /// Substring a file name must contain to be treated as a game log
    #[serde(default = "default_file_marker", alias = "fileMarker")]
    pub file_marker: String,
    #[serde(default = "default_ignored_files", alias = "ignoredFiles")]
    pub ignored_files: Vec<String>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_character_table() -> PathBuf {
    PathBuf::from("CharNames.csv")
}

fn default_file_marker() -> String {
    "decoded".to_string()
}

fn default_ignored_files() -> Vec<String> {
    vec![".DS_Store".to_string()]
}

fn default_parallel() -> bool {
    true
}

impl SearchConfig {
    /// Config with every optional field at its default
    pub fn new(stat_directory: impl Into<PathBuf>) -> Self {
        Self {
            stat_directory: stat_directory.into(),
            character_table: default_character_table(),
            file_marker: default_file_marker(),
            ignored_files: default_ignored_files(),
            parallel: default_parallel(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse search config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load `path` if it exists, otherwise start from `stat_directory`.
    ///
    /// A missing file is only acceptable when the caller already knows the
    /// directory (e.g. `--dir` on the command line).
    pub fn load_or_default(path: &Path, stat_directory: Option<&Path>) -> Result<Self> {
        match (path.exists(), stat_directory) {
            (true, Some(dir)) => {
                let mut config = Self::load(path)?;
                config.stat_directory = dir.to_path_buf();
                Ok(config)
            }
            (true, None) => Self::load(path),
            (false, Some(dir)) => Ok(Self::new(dir)),
            (false, None) => anyhow::bail!(
                "Config file {} not found and no stat directory given",
                path.display()
            ),
        }
    }

    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignored_files.iter().any(|ignored| ignored == file_name)
    }
}
