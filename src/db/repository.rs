//! SQLite-backed match store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::models::MatchRow;
use crate::db::{MatchFilter, MatchStore, StoreError, StoreErrorKind, schema};
use crate::ids::MatchId;
use crate::record::Match;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Match store persisted to a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteMatchStore {
    db_path: String,
}

impl SqliteMatchStore {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteMatchStore");
        let store = Self { db_path };
        store.run_migrations()?;
        Ok(store)
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::backend(format!("Migration failed: {}", e)))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::backend(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }
}

impl MatchStore for SqliteMatchStore {
    #[instrument(skip(self, record), fields(match_id = %record.uuid()))]
    fn create(&self, record: &Match) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let row = MatchRow::encode(record)?;
        diesel::insert_into(schema::matches::table)
            .values(&row)
            .execute(&mut conn)?;
        info!("Match inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    fn read(&self, id: &MatchId) -> Result<Option<Match>, StoreError> {
        let mut conn = self.connection()?;
        let row = schema::matches::table
            .find(id.to_string())
            .select(MatchRow::as_select())
            .first(&mut conn)
            .optional()?;
        match row {
            Some(row) => row.decode().map(Some),
            None => {
                debug!(match_id = %id, "Match not found");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, record), fields(match_id = %record.uuid(), version = record.version()))]
    fn write(&self, record: &Match) -> Result<Match, StoreError> {
        use schema::matches::dsl;

        let mut conn = self.connection()?;
        let expected = MatchRow::encode(record)?;
        let mut next = record.clone();
        next.version += 1;
        let row = MatchRow::encode(&next)?;

        let updated = diesel::update(
            dsl::matches
                .filter(dsl::uuid.eq(row.uuid().as_str()))
                .filter(dsl::version.eq(*expected.version())),
        )
        .set((
            dsl::started.eq(*row.started()),
            dsl::concluded.eq(*row.concluded()),
            dsl::version.eq(*row.version()),
            dsl::record.eq(row.record().as_str()),
        ))
        .execute(&mut conn)?;

        if updated == 0 {
            let exists = dsl::matches
                .find(row.uuid().as_str())
                .select(dsl::version)
                .first::<i64>(&mut conn)
                .optional()?;
            return Err(match exists {
                Some(found) => {
                    warn!(found, "Stale write rejected");
                    StoreError::new(
                        StoreErrorKind::Conflict,
                        format!("Match was modified (expected version {}, found {})", expected.version(), found),
                    )
                }
                None => StoreError::new(StoreErrorKind::NotFound, "Match no longer exists"),
            });
        }

        debug!(version = next.version, "Match written");
        Ok(next)
    }

    #[instrument(skip(self))]
    fn delete(&self, id: &MatchId) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(schema::matches::table.find(id.to_string())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(StoreError::new(StoreErrorKind::NotFound, "Match no longer exists"));
        }
        info!(match_id = %id, "Match deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    fn list(&self, filter: MatchFilter) -> Result<Vec<Match>, StoreError> {
        use schema::matches::dsl;

        let mut conn = self.connection()?;
        let query = dsl::matches.select(MatchRow::as_select()).order(dsl::created_at.asc());
        let rows = match filter {
            MatchFilter::Unstarted => query.filter(dsl::started.eq(false)).load(&mut conn)?,
            MatchFilter::Active => query
                .filter(dsl::started.eq(true))
                .filter(dsl::concluded.eq(false))
                .load(&mut conn)?,
            MatchFilter::Finished => query.filter(dsl::concluded.eq(true)).load(&mut conn)?,
        };

        let matches = rows.iter().map(MatchRow::decode).collect::<Result<Vec<_>, _>>()?;
        info!(count = matches.len(), %filter, "Listed matches");
        Ok(matches)
    }
}
