//! Raw stat-file model and the lookup tables used to interpret it.
//!
//! - `game_log`: serde types mirroring the on-disk JSON keys
//! - `character_stats`: per-character box score blocks and their rate stats
//! - `lookup`: closed enumerations for every categorical field
//! - `version`: version-keyed orientation and roster-key tables

pub mod character_stats;
pub mod game_log;
pub mod lookup;
pub mod version;

pub use character_stats::{DefensiveStats, OffensiveStats};
pub use game_log::{
    GameLog, RawContact, RawEvent, RawFirstFielder, RawNumber, RawPitch, RawRosterEntry, RawRunner,
};
pub use lookup::{
    CategoricalDimension, ChargeType, ContactType, DomainValue, FielderPosition, IndexedValue,
    InputDirection, PitchType, ResultOfAtBat, StealKind, SwingType,
};
pub use version::{orientation, roster_key, TeamOrientation, UNVERSIONED};
