//! Engine error type.

use derive_more::{Display, Error, From};
use tracing::warn;

use cots_rules::InvalidOperation;

use crate::db::StoreError;

/// Failure of a match operation.
///
/// Rule violations and store failures are the only two kinds. Neither is
/// retried by the engine, and in both cases the stored match is unchanged.
#[derive(Debug, Clone, Display, Error, From)]
pub enum MatchError {
    /// The operation broke a game rule; the reason is the caller contract.
    #[display("{}", _0)]
    Invalid(InvalidOperation),
    /// The match store failed, surfaced unchanged.
    #[display("{}", _0)]
    Store(StoreError),
}

impl MatchError {
    /// Reason of a rule violation, `None` for store failures.
    pub fn reason(&self) -> Option<&str> {
        match self {
            MatchError::Invalid(err) => Some(err.reason()),
            MatchError::Store(_) => None,
        }
    }

    /// True if this is a rule violation.
    pub fn is_invalid(&self) -> bool {
        matches!(self, MatchError::Invalid(_))
    }
}

/// Shorthand for a rule violation wrapped as [`MatchError`].
#[track_caller]
pub(crate) fn invalid(reason: impl Into<String>) -> MatchError {
    rejected(InvalidOperation::new(reason))
}

/// Logs a rule violation and wraps it.
pub(crate) fn rejected(err: InvalidOperation) -> MatchError {
    warn!(reason = %err.reason(), file = err.file, line = err.line, "Operation rejected");
    MatchError::Invalid(err)
}
