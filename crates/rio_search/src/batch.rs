//! Batch evaluation over many stat files
//!
//! Each file is independent: load -> normalize -> index -> evaluate ->
//! project. The game and its index are dropped as soon as the matches are
//! projected, so a batch holds at most one loaded game per worker. Files run
//! on the rayon pool when `parallel` is set; results are always reported in
//! input order.

use rayon::prelude::*;
use rio_core::query::Filter;
use rio_core::{EventSearch, IndexError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::projector::{GameHeader, MatchedEvent};

/// Projected matches from one game file
#[derive(Debug, Clone)]
pub struct FileMatches {
    pub path: PathBuf,
    pub header: GameHeader,
    /// Ascending by event id, never empty
    pub matches: Vec<MatchedEvent>,
}

impl FileMatches {
    /// Print-ready blocks, one per match
    pub fn describe<'a>(&'a self, summary: &'a str) -> impl Iterator<Item = String> + 'a {
        self.matches.iter().map(move |m| m.describe(&self.header, summary))
    }
}

/// A file that could not be read as a game log
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: IndexError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files with at least one matching event
    pub files: Vec<FileMatches>,
    /// Files that loaded, matching or not
    pub loaded: usize,
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn total_matches(&self) -> usize {
        self.files.iter().map(|f| f.matches.len()).sum()
    }
}

enum Outcome {
    Matched(FileMatches),
    NoMatches,
    Skipped(SkippedFile),
}

fn process_file(path: &Path, filters: &[Filter]) -> rio_core::Result<Outcome> {
    let search = match EventSearch::load(path) {
        Ok(search) => search,
        Err(error) if error.is_recoverable() => {
            warn!(path = %path.display(), error = %error, "Skipping unreadable game file");
            return Ok(Outcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                error,
            }));
        }
        Err(error) => return Err(error),
    };
    let events = search.evaluate(filters)?;
    debug!(path = %path.display(), matches = events.len(), "Evaluated game file");
    if events.is_empty() {
        return Ok(Outcome::NoMatches);
    }

    let game = search.game();
    let matches = events
        .iter()
        .map(|id| {
            MatchedEvent::of(game, *id).ok_or_else(|| {
                IndexError::InternalConsistency(format!("matched event {} is not in the game", id))
            })
        })
        .collect::<rio_core::Result<Vec<_>>>()?;
    Ok(Outcome::Matched(FileMatches {
        path: path.to_path_buf(),
        header: GameHeader::of(game),
        matches,
    }))
}

/// Evaluate `filters` against every file.
///
/// Unreadable or malformed files are skipped with a warning. Any other error,
/// such as an invalid filter value, aborts the whole batch since it would
/// fail the same way for every file.
pub fn run_batch(
    files: &[PathBuf],
    filters: &[Filter],
    parallel: bool,
) -> rio_core::Result<BatchReport> {
    let outcomes: Vec<Outcome> = if parallel {
        files
            .par_iter()
            .map(|path| process_file(path, filters))
            .collect::<rio_core::Result<_>>()?
    } else {
        files
            .iter()
            .map(|path| process_file(path, filters))
            .collect::<rio_core::Result<_>>()?
    };

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Outcome::Matched(matches) => {
                report.loaded += 1;
                report.files.push(matches);
            }
            Outcome::NoMatches => report.loaded += 1,
            Outcome::Skipped(skipped) => report.skipped.push(skipped),
        }
    }

    info!(
        loaded = report.loaded,
        matching = report.files.len(),
        skipped = report.skipped.len(),
        matches = report.total_matches(),
        "Batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{event, game};
    use std::fs;

    fn write_games(dir: &Path) -> Vec<PathBuf> {
        let two_homers = game(vec![event(1, 0, 0, 0, 0, "HR"), event(1, 0, 0, 2, 1, "HR")]);
        let games = [
            ("decoded.1.json", two_homers.to_string()),
            ("decoded.2.json", "{ not json".to_string()),
            ("decoded.3.json", game(vec![event(1, 0, 0, 1, 0, "Single")]).to_string()),
            ("decoded.4.json", game(vec![event(2, 1, 1, 2, 2, "HR")]).to_string()),
        ];
        games
            .iter()
            .map(|(name, body)| {
                let path = dir.join(name);
                fs::write(&path, body).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_skips_malformed_file_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_games(dir.path());
        let filters = [Filter::result("hr")];

        for parallel in [false, true] {
            let report = run_batch(&files, &filters, parallel).unwrap();
            assert_eq!(report.loaded, 3);
            assert_eq!(report.skipped.len(), 1);
            assert_eq!(report.skipped[0].path, files[1]);
            assert!(matches!(report.skipped[0].error, IndexError::MalformedInput { .. }));

            // decoded.3 loaded but has no home run, so nothing of it is kept
            let matching: Vec<&Path> = report.files.iter().map(|f| f.path.as_path()).collect();
            assert_eq!(matching, [files[0].as_path(), files[3].as_path()]);
            let counts: Vec<usize> = report.files.iter().map(|f| f.matches.len()).collect();
            assert_eq!(counts, [2, 1]);
            assert_eq!(report.total_matches(), 3);
        }
    }

    #[test]
    fn test_matches_are_projected_rows() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_games(dir.path());
        let report = run_batch(&files, &[Filter::result("hr")], true).unwrap();

        let first = &report.files[0];
        let ids: Vec<u32> = first.matches.iter().map(|m| m.event_id).collect();
        assert_eq!(ids, [0, 1]);
        assert_eq!((first.matches[1].balls, first.matches[1].strikes), (2, 1));
        assert_eq!(first.header.players, ["Roadie".to_string(), "Homebody".to_string()]);

        let blocks: Vec<String> = report.files[1].describe("[hr]").collect();
        assert_eq!(
            blocks,
            ["Roadie at Homebody Sat Mar  2 21:04:05 2024\nBot 2   1 Out(s)   2-2\n[hr]"]
        );
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_batch(&[dir.path().join("decoded.gone.json")], &[], true).unwrap();
        assert!(report.files.is_empty());
        assert_eq!(report.loaded, 0);
        assert!(matches!(report.skipped[0].error, IndexError::Io(_)));
    }

    #[test]
    fn test_filter_error_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_games(dir.path());
        let err = run_batch(&files, &[Filter::result("triple play")], true).unwrap_err();
        assert!(matches!(err, IndexError::InvalidFilterValue { .. }));

        let err = run_batch(&files, &[Filter::runners([0, 1])], false).unwrap_err();
        assert!(matches!(err, IndexError::InvalidFilterCombination(_)));
    }

    #[test]
    fn test_empty_batch() {
        let report = run_batch(&[], &[Filter::result("hr")], true).unwrap();
        assert_eq!(report.total_matches(), 0);
        assert!(report.skipped.is_empty());
    }
}
