//! Store error types.

use derive_more::{Display, Error};

/// Broad category of a store failure.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// No record exists for the requested match.
    #[display("not found")]
    NotFound,
    /// A record with the same ID already exists.
    #[display("already exists")]
    AlreadyExists,
    /// The record changed since it was read.
    #[display("conflict")]
    Conflict,
    /// A stored record could not be decoded or encoded.
    #[display("corrupt record")]
    Corrupt,
    /// The backend is unavailable or failed.
    #[display("backend")]
    Backend,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// Failure category.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Backend failure.
    #[track_caller]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Backend, message)
    }

    /// True if the write lost an optimistic concurrency race.
    pub fn is_conflict(&self) -> bool {
        self.kind == StoreErrorKind::Conflict
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};
        match err {
            Error::NotFound => Self::new(StoreErrorKind::NotFound, "Record not found"),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::new(StoreErrorKind::AlreadyExists, info.message().to_string())
            }
            other => Self::backend(format!("Diesel error: {}", other)),
        }
    }
}

impl From<diesel::ConnectionError> for StoreError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::backend(format!("Connection error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(StoreErrorKind::Corrupt, format!("Record encoding error: {}", err))
    }
}
