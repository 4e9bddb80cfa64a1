//! One search over one stat directory

use anyhow::{Context, Result};
use rio_core::index::CharacterRole;
use rio_core::query::Filter;
use std::path::PathBuf;
use tracing::debug;

use crate::batch::{run_batch, BatchReport};
use crate::character_table::CharacterTable;
use crate::config::SearchConfig;
use crate::discovery::discover_game_files;

/// Configuration and character table for a search, resolved up front
#[derive(Debug, Clone)]
pub struct SearchSession {
    config: SearchConfig,
    characters: CharacterTable,
}

impl SearchSession {
    pub fn new(config: SearchConfig, characters: CharacterTable) -> Self {
        Self { config, characters }
    }

    /// Load the character table named by the config
    pub fn open(config: SearchConfig) -> Result<Self> {
        let (characters, stats) = CharacterTable::load(&config.character_table)?;
        debug!(
            characters = characters.len(),
            failed = stats.failed,
            duplicate_aliases = stats.duplicate_aliases,
            "Search session opened"
        );
        Ok(Self::new(config, characters))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn characters(&self) -> &CharacterTable {
        &self.characters
    }

    /// Character filter from a user-typed name
    pub fn character_filter(&self, role: CharacterRole, name: &str) -> rio_core::Result<Filter> {
        Ok(Filter::character(role, self.characters.resolve(name)?))
    }

    pub fn game_files(&self) -> Result<Vec<PathBuf>> {
        discover_game_files(&self.config)
    }

    /// Discover game files and evaluate `filters` against each
    pub fn run(&self, filters: &[Filter]) -> Result<BatchReport> {
        let files = self.game_files()?;
        run_batch(&files, filters, self.config.parallel).with_context(|| {
            format!("Search over {} aborted", self.config.stat_directory.display())
        })
    }
}
