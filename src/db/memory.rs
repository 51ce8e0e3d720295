//! In-process match store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use crate::db::{MatchFilter, MatchStore, StoreError, StoreErrorKind};
use crate::ids::MatchId;
use crate::record::Match;

/// Match store held in memory, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatchStore {
    matches: Arc<Mutex<HashMap<MatchId, Match>>>,
}

impl InMemoryMatchStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory match store");
        Self::default()
    }

    /// Number of stored matches.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<MatchId, Match>> {
        self.matches.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MatchStore for InMemoryMatchStore {
    #[instrument(skip(self, record), fields(match_id = %record.uuid()))]
    fn create(&self, record: &Match) -> Result<(), StoreError> {
        let mut matches = self.lock();
        if matches.contains_key(record.uuid()) {
            warn!("Match already exists");
            return Err(StoreError::new(StoreErrorKind::AlreadyExists, "Match already exists"));
        }
        matches.insert(*record.uuid(), record.clone());
        debug!("Match created");
        Ok(())
    }

    #[instrument(skip(self))]
    fn read(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        let found = self.lock().get(id).cloned();
        if found.is_none() {
            debug!(match_id = %id, "Match not found");
        }
        Ok(found)
    }

    #[instrument(skip(self, record), fields(match_id = %record.uuid(), version = record.version()))]
    fn write(&self, record: &Match) -> Result<Match, StoreError> {
        let mut matches = self.lock();
        let stored = matches
            .get_mut(record.uuid())
            .ok_or_else(|| StoreError::new(StoreErrorKind::NotFound, "Match no longer exists"))?;
        if stored.version != record.version {
            warn!(stored = stored.version, "Stale write rejected");
            return Err(StoreError::new(
                StoreErrorKind::Conflict,
                format!("Match was modified (expected version {}, found {})", record.version, stored.version),
            ));
        }
        let mut next = record.clone();
        next.version += 1;
        *stored = next.clone();
        debug!(version = next.version, "Match written");
        Ok(next)
    }

    #[instrument(skip(self))]
    fn delete(&self, id: &MatchId) -> Result<(), StoreError> {
        match self.lock().remove(id) {
            Some(_) => {
                debug!(match_id = %id, "Match deleted");
                Ok(())
            }
            None => Err(StoreError::new(StoreErrorKind::NotFound, "Match no longer exists")),
        }
    }

    #[instrument(skip(self))]
    fn list(&self, filter: MatchFilter) -> Result<Vec<Match>, StoreError> {
        let mut found: Vec<Match> = self
            .lock()
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect();
        found.sort_by_key(|m| *m.creation_date());
        debug!(count = found.len(), %filter, "Listed matches");
        Ok(found)
    }
}
