//! # rio_search - Event Lookup
//!
//! Runs one set of replay filters over every decoded stat file in a
//! directory.
//!
//! Stat directory -> discovery -> per-file index (rio_core) -> matches
//!
//! ## Modules
//! - `config`: `config.json` with the stat directory and file rules
//! - `character_table`: `CharNames.csv` alias table for character names
//! - `discovery`: which files in the directory are game logs
//! - `batch`: load/normalize/index/evaluate every file, in parallel
//! - `projector`: human-readable line per matched event
//! - `session`: config and character table bound together for one search

pub mod batch;
pub mod character_table;
pub mod config;
pub mod discovery;
pub mod projector;
pub mod session;

pub use batch::{run_batch, BatchReport, FileMatches, SkippedFile};
pub use character_table::{CharacterTable, ParseStats};
pub use config::SearchConfig;
pub use discovery::discover_game_files;
pub use projector::{describe_match, summarize_filters, GameHeader, MatchedEvent};
pub use session::SearchSession;

#[cfg(test)]
pub(crate) mod test_support;
