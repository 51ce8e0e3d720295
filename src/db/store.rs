//! The match store interface.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::db::StoreError;
use crate::ids::MatchId;
use crate::record::Match;

/// Listing filter.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFilter {
    /// Not yet started.
    #[display("unstarted")]
    Unstarted,
    /// Started and not concluded.
    #[display("active")]
    Active,
    /// Won, resigned or drawn.
    #[display("finished")]
    Finished,
}

impl MatchFilter {
    /// True if `record` belongs in this listing.
    pub fn matches(&self, record: &Match) -> bool {
        match self {
            MatchFilter::Unstarted => !record.started,
            MatchFilter::Active => record.started && !record.is_concluded(),
            MatchFilter::Finished => record.is_concluded(),
        }
    }
}

/// Single source of truth for match records.
///
/// `write` is a conditional write: it succeeds only if the stored version
/// equals `record.version()`, and returns the record with its version
/// bumped. A stale write fails with [`crate::StoreErrorKind::Conflict`], so
/// two concurrent read-modify-write cycles on one match cannot both commit.
pub trait MatchStore {
    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the ID is taken or the backend fails.
    fn create(&self, record: &Match) -> Result<(), StoreError>;

    /// Reads a record, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the record is corrupt.
    fn read(&self, id: &MatchId) -> Result<Option<Match>, StoreError>;

    /// Replaces a record if nobody else has written it since it was read.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on a version conflict, a vanished record, or a
    /// backend failure.
    fn write(&self, record: &Match) -> Result<Match, StoreError>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record is absent or the backend fails.
    fn delete(&self, id: &MatchId) -> Result<(), StoreError>;

    /// Lists records matching `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn list(&self, filter: MatchFilter) -> Result<Vec<Match>, StoreError>;
}
