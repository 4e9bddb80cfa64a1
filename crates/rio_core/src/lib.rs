//! # rio_core - Replay Event Index
//!
//! Builds an in-memory index over the events of one decoded stat file and
//! answers composite queries by set intersection.
//!
//! ## Pipeline
//! - `models`: raw JSON document, closed enumerations, version tables
//! - `normalize`: canonical, version-independent events (Event Normalizer)
//! - `index`: per-dimension event sets (Index Builder)
//! - `query`: typed filters intersected into a match set (Query Evaluator)
//! - `search`: one game plus its index behind a single handle

pub mod error;
pub mod index;
pub mod models;
pub mod normalize;
pub mod query;
pub mod search;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{IndexError, Result};
pub use index::{EventIndex, EventSet};
pub use normalize::{EventId, ReplayGame};
pub use query::{Filter, QueryEvaluator};
pub use search::EventSearch;

/// Crate version, reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
