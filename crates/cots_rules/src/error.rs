//! Rule violation error.

use derive_more::{Display, Error};

/// A rejected operation, carrying the reason callers match against.
///
/// Every rule violation in the engine is reported through this one type.
/// The reason string is the contract; the source location is diagnostic.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", reason)]
pub struct InvalidOperation {
    /// Human-readable reason.
    pub reason: String,
    /// Line number where the violation was raised.
    pub line: u32,
    /// Source file where the violation was raised.
    pub file: &'static str,
}

impl InvalidOperation {
    /// Creates a new violation with caller location tracking.
    #[track_caller]
    pub fn new(reason: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            reason: reason.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the reason string.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl PartialEq for InvalidOperation {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason
    }
}

impl Eq for InvalidOperation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_reason_only() {
        let err = InvalidOperation::new("Game over");
        assert_eq!(err.to_string(), "Game over");
        assert!(err.file.ends_with("error.rs"));
    }

    #[test]
    fn test_equality_ignores_location() {
        let a = InvalidOperation::new("Match has already started");
        let b = InvalidOperation::new("Match has already started");
        assert_eq!(a, b);
    }
}
