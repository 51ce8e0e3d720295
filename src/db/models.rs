//! Database row model for match records.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use tracing::instrument;

use crate::db::{StoreError, StoreErrorKind, schema};
use crate::record::Match;

/// One row of the `matches` table.
///
/// Filter columns are denormalised from the record; `record` holds the full
/// match as JSON and is the source of truth.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, Getters)]
#[diesel(table_name = schema::matches)]
#[diesel(primary_key(uuid))]
pub struct MatchRow {
    uuid: String,
    host: String,
    started: bool,
    concluded: bool,
    version: i64,
    created_at: NaiveDateTime,
    record: String,
}

impl MatchRow {
    /// Encodes a match record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be serialized or its
    /// version does not fit the column.
    #[instrument(skip(record), fields(match_id = %record.uuid()))]
    pub fn encode(record: &Match) -> Result<Self, StoreError> {
        let version = i64::try_from(*record.version())
            .map_err(|_| StoreError::new(StoreErrorKind::Corrupt, "Version overflow"))?;
        Ok(Self {
            uuid: record.uuid().to_string(),
            host: record.host().to_string(),
            started: *record.started(),
            concluded: record.is_concluded(),
            version,
            created_at: record.creation_date().naive_utc(),
            record: serde_json::to_string(record)?,
        })
    }

    /// Decodes the stored match record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the JSON is unreadable or disagrees with
    /// the row's version column.
    #[instrument(skip(self), fields(match_id = %self.uuid))]
    pub fn decode(&self) -> Result<Match, StoreError> {
        let record: Match = serde_json::from_str(&self.record)?;
        if i64::try_from(*record.version()).ok() != Some(self.version) {
            return Err(StoreError::new(
                StoreErrorKind::Corrupt,
                format!("Version column {} disagrees with record", self.version),
            ));
        }
        Ok(record)
    }
}
