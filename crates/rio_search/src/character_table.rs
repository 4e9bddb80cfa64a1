//! Character name table - CharNames.csv -> alias lookup
//!
//! Each CSV row lists every accepted spelling of one character. The first
//! cell is the character id as it appears in stat files, e.g.
//!
//! ```text
//! Toad(R),toad,red toad,toad red
//! Koopa(G),green koopa,koopa troopa
//! ```
//!
//! Lookups are trimmed and case-insensitive.

use anyhow::{Context, Result};
use rio_core::IndexError;
use rustc_hash::FxHashMap;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    /// Lowercased alias -> canonical character id
    aliases: FxHashMap<String, String>,
    /// Canonical ids in row order
    characters: Vec<String>,
}

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    pub failed: u32,
    /// Aliases already claimed by an earlier row
    pub duplicate_aliases: u32,
}

impl CharacterTable {
    /// Build from in-memory rows, first cell canonical
    pub fn from_rows<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        let mut stats = ParseStats::default();
        for row in rows {
            let cells: Vec<String> = row.into_iter().map(|c| c.as_ref().to_string()).collect();
            table.insert_row(&cells, &mut stats);
        }
        table
    }

    pub fn from_reader<R: io::Read>(reader: R) -> Result<(Self, ParseStats)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::default();
        let mut stats = ParseStats::default();

        for result in reader.records() {
            stats.total_rows += 1;
            match result {
                Ok(record) => {
                    let cells: Vec<String> = record.iter().map(str::to_string).collect();
                    table.insert_row(&cells, &mut stats);
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!(row = stats.total_rows, error = %e, "Unreadable character row");
                }
            }
        }

        debug!(
            characters = table.characters.len(),
            aliases = table.aliases.len(),
            failed = stats.failed,
            "Character table loaded"
        );
        Ok((table, stats))
    }

    pub fn load(csv_path: &Path) -> Result<(Self, ParseStats)> {
        let file = std::fs::File::open(csv_path)
            .with_context(|| format!("Failed to open character table: {}", csv_path.display()))?;
        Self::from_reader(file)
            .with_context(|| format!("Failed to parse character table: {}", csv_path.display()))
    }

    fn insert_row(&mut self, cells: &[String], stats: &mut ParseStats) {
        let mut names = cells
            .iter()
            .map(|cell| cell.trim().trim_start_matches('\u{feff}').trim())
            .filter(|cell| !cell.is_empty());

        let Some(canonical) = names.next() else {
            stats.failed += 1;
            return;
        };
        let canonical = canonical.to_string();

        for name in std::iter::once(canonical.as_str()).chain(names) {
            let key = name.to_lowercase();
            match self.aliases.get(&key) {
                Some(existing) if *existing != canonical => {
                    stats.duplicate_aliases += 1;
                    warn!(alias = %name, kept = %existing, ignored = %canonical, "Duplicate character alias");
                }
                Some(_) => {}
                None => {
                    self.aliases.insert(key, canonical.clone());
                }
            }
        }
        self.characters.push(canonical);
        stats.parsed += 1;
    }

    /// Canonical character id for a user-typed name
    pub fn resolve(&self, input: &str) -> rio_core::Result<String> {
        self.aliases
            .get(&input.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| IndexError::UnknownCharacter(input.to_string()))
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
