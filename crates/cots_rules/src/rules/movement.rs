//! Per-turn destination legality for a moving ship.

use tracing::{instrument, warn};

use crate::error::InvalidOperation;
use crate::fleet::Fleet;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, Ship};

const LAST_COLUMN: i8 = BOARD_WIDTH - 1;
const LAST_ROW: i8 = BOARD_HEIGHT - 1;

/// Checks that `current` may move to the square of `proposed`.
///
/// A ship moves exactly one square along x or y. Edge columns and rows are
/// clamped first so a ship on the border cannot jump inward. A square held
/// by an enemy ship is accepted here; the caller arbitrates it.
///
/// # Errors
///
/// Returns [`InvalidOperation`] for an off-board destination, a non-move,
/// a jump of more than one square, a diagonal step, or a square already
/// held by a ship of `own_fleet`.
#[instrument(skip(own_fleet), fields(ship = %current.id(), from = %current.coordinates, to = %proposed.coordinates))]
pub fn validate_move(current: &Ship, proposed: &Ship, own_fleet: &Fleet) -> Result<(), InvalidOperation> {
    let class = current.ship_class;
    let from = current.coordinates;
    let to = proposed.coordinates;

    if !(0..BOARD_WIDTH).contains(&to.x) {
        return Err(InvalidOperation::new(format!("X coordinate is invalid for {class}")));
    }
    if !(0..BOARD_HEIGHT).contains(&to.y) {
        return Err(InvalidOperation::new(format!("Y coordinate is invalid for {class}")));
    }
    if from == to {
        return Err(InvalidOperation::new(format!("{class} did not move")));
    }

    if (from.x == 0 && to.x > 1) || (from.x == LAST_COLUMN && to.x < LAST_COLUMN - 1) {
        return Err(InvalidOperation::new("X coordinate is invalid"));
    }
    if (from.y == 0 && to.y > 1) || (from.y == LAST_ROW && to.y < LAST_ROW - 1) {
        return Err(InvalidOperation::new("Y coordinate is invalid"));
    }

    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    if dx > 1 {
        return Err(InvalidOperation::new("X coordinate is invalid"));
    }
    if dy > 1 {
        return Err(InvalidOperation::new("Y coordinate is invalid"));
    }
    if dx == 1 && dy == 1 {
        return Err(InvalidOperation::new(format!("{class} cannot move diagonally")));
    }

    if let Some(occupant) = own_fleet.ship_at(to) {
        warn!(occupant = %occupant.id(), "Destination held by own fleet");
        return Err(InvalidOperation::new("Coordinates is already occupied"));
    }
    Ok(())
}
