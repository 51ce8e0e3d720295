//! Append-only turn log used for replays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cots_rules::{Color, Coordinates, Fleets, Outcome, ShipId};

/// Both fleets as they stood after one executed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    /// 1-based turn number.
    pub turn: u32,
    /// Side that moved.
    pub mover: Color,
    /// Ship that moved.
    pub ship: ShipId,
    /// Square the ship left.
    pub from: Coordinates,
    /// Square the ship entered.
    pub to: Coordinates,
    /// Combat result if the square was held by an enemy ship.
    pub combat: Option<Outcome>,
    /// Fleets after combat.
    pub fleets: Fleets,
    /// When the turn was executed.
    pub played_at: DateTime<Utc>,
}

/// Ordered turn snapshots of one match.
///
/// Entries are only ever appended; nothing edits a recorded turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    turns: Vec<TurnSnapshot>,
}

impl History {
    /// Number of executed turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True before the first move.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turn snapshots, oldest first.
    pub fn turns(&self) -> &[TurnSnapshot] {
        &self.turns
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&TurnSnapshot> {
        self.turns.last()
    }

    /// Turn number the next snapshot will carry.
    pub fn next_turn(&self) -> u32 {
        u32::try_from(self.turns.len()).map_or(u32::MAX, |n| n.saturating_add(1))
    }

    pub(crate) fn append(&mut self, snapshot: TurnSnapshot) {
        self.turns.push(snapshot);
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a TurnSnapshot;
    type IntoIter = std::slice::Iter<'a, TurnSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}
