//! Combat resolution between two ships sharing a square.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::InvalidOperation;
use crate::types::Ship;

/// Result of a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The moving ship survives, the defender is sunk.
    AttackerWins,
    /// The defender survives, the moving ship is sunk.
    DefenderWins,
    /// Both ships are sunk.
    Tie,
}

/// Resolves a collision between `attacker` (the ship that moved) and
/// `defender`.
///
/// Overrides are applied before the rank comparison:
/// 1. submarine attacking a littoral combat ship loses;
/// 2. littoral combat ship attacking a submarine wins;
/// 3. command ship attacking a command ship wins;
/// 4. equal ranks tie, which covers the same class and the duplicate
///    submarine and littoral combat ship slots;
/// 5. otherwise the higher rank wins.
///
/// # Errors
///
/// Returns [`InvalidOperation`] if either ship is unplaced, the squares
/// differ, the colors match, or either class is unknown.
#[instrument(fields(attacker = %attacker.id(), defender = %defender.id(), square = %attacker.coordinates))]
pub fn arbitrate(attacker: &Ship, defender: &Ship) -> Result<Outcome, InvalidOperation> {
    if !attacker.coordinates.is_placed() {
        return Err(InvalidOperation::new("Attacking ship is not positioned"));
    }
    if !defender.coordinates.is_placed() {
        return Err(InvalidOperation::new("Defending ship is not positioned"));
    }
    if attacker.coordinates != defender.coordinates {
        return Err(InvalidOperation::new("Coordinates are not the same"));
    }
    if attacker.color == defender.color {
        return Err(InvalidOperation::new("Attacking own ship is not allowed"));
    }
    let Some(attacking_rank) = attacker.ship_class.rank() else {
        return Err(InvalidOperation::new("Attacking ship class cannot be unknown"));
    };
    let Some(defending_rank) = defender.ship_class.rank() else {
        return Err(InvalidOperation::new("Defending ship class cannot be unknown"));
    };

    let a = attacker.ship_class;
    let d = defender.ship_class;
    let outcome = if a.is_submarine() && d.is_littoral_combat_ship() {
        Outcome::DefenderWins
    } else if a.is_littoral_combat_ship() && d.is_submarine() {
        Outcome::AttackerWins
    } else if a.is_command_ship() && d.is_command_ship() {
        Outcome::AttackerWins
    } else if attacking_rank == defending_rank {
        Outcome::Tie
    } else if attacking_rank > defending_rank {
        Outcome::AttackerWins
    } else {
        Outcome::DefenderWins
    };

    debug!(?outcome, attacking_rank, defending_rank, "Collision resolved");
    Ok(outcome)
}

/// [`arbitrate`] expressed as the surviving ship, `None` on a tie.
///
/// # Errors
///
/// Same as [`arbitrate`].
#[instrument]
pub fn winner(attacker: &Ship, defender: &Ship) -> Result<Option<Ship>, InvalidOperation> {
    Ok(match arbitrate(attacker, defender)? {
        Outcome::AttackerWins => Some(*attacker),
        Outcome::DefenderWins => Some(*defender),
        Outcome::Tie => None,
    })
}
