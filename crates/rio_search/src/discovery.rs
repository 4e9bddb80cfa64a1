//! Game file discovery

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::config::SearchConfig;

/// Regular files in the stat directory that look like decoded game logs.
///
/// A file qualifies when its name contains `file_marker` and is not listed in
/// `ignored_files`. Subdirectories are not searched. The result is sorted by
/// file name so batch output is stable across platforms.
pub fn discover_game_files(config: &SearchConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.stat_directory;
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read stat directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            debug!(path = %entry.path().display(), "Skipping non UTF-8 file name");
            continue;
        };
        if config.is_ignored(name) || !name.contains(&config.file_marker) {
            continue;
        }
        if entry.path().is_file() {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), files = files.len(), "Discovered game files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "{}").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_marker_ignore_and_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "decoded.20240102.json");
        touch(dir.path(), "decoded.20240101.json");
        touch(dir.path(), "raw.20240101.json");
        touch(dir.path(), ".DS_Store");
        fs::create_dir(dir.path().join("decoded_archive"))?;

        let files = discover_game_files(&SearchConfig::new(dir.path()))?;
        assert_eq!(names(&files), ["decoded.20240101.json", "decoded.20240102.json"]);
        Ok(())
    }

    #[test]
    fn test_ignored_file_with_marker() -> Result<()> {
        let dir = tempfile::tempdir()?;
        touch(dir.path(), "decoded.a.json");
        touch(dir.path(), "decoded.skip.json");

        let mut config = SearchConfig::new(dir.path());
        config.ignored_files.push("decoded.skip.json".to_string());
        assert_eq!(names(&discover_game_files(&config)?), ["decoded.a.json"]);
        Ok(())
    }

    #[test]
    fn test_missing_directory() {
        let config = SearchConfig::new("/nonexistent/stats");
        assert!(discover_game_files(&config).is_err());
    }
}
