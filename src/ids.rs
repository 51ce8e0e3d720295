//! Opaque identifiers for players and matches.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cots_rules::InvalidOperation;

/// Opaque player identifier supplied by the identity layer.
///
/// The engine never authenticates; it only requires the identifier to be
/// non-blank. Deserialization applies the same check.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOperation`] if `raw` is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidOperation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidOperation::new("Player ID must not be empty"));
        }
        Ok(Self(raw))
    }

    /// Borrowed form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerId {
    type Error = InvalidOperation;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PlayerId {
    type Err = InvalidOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier of a match.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Creates a new random match ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a match ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::str::FromStr for MatchId {
    type Err = InvalidOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| InvalidOperation::new("Match ID is invalid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_player_rejected() {
        let err = PlayerId::new("  ").unwrap_err();
        assert_eq!(err.reason(), "Player ID must not be empty");
        assert_eq!(PlayerId::new("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_player_id_deserialize_checks_blank() {
        let id: PlayerId = serde_json::from_str("\"alice\"").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"alice\"");

        let err = serde_json::from_str::<PlayerId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("Player ID must not be empty"));
        assert!(serde_json::from_str::<PlayerId>("\"   \"").is_err());
    }

    #[test]
    fn test_match_id_parse() {
        let id = MatchId::new();
        let parsed: MatchId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<MatchId>().is_err());
    }
}
