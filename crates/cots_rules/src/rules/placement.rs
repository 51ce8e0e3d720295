//! Starting-zone and fleet-completeness checks used during fleet setup.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::error::InvalidOperation;
use crate::fleet::Fleet;
use crate::types::{BOARD_WIDTH, FLEET_SIZE, Ship};

/// Checks that a ship stands inside its color's starting zone.
///
/// White deploys to rows 0..=2, black to rows 5..=7; both use every column.
///
/// # Errors
///
/// Returns [`InvalidOperation`] naming the offending axis and class.
#[instrument(fields(ship = %ship.id(), square = %ship.coordinates))]
pub fn validate_starting_position(ship: &Ship) -> Result<(), InvalidOperation> {
    if ship.ship_class.is_unknown() {
        return Err(InvalidOperation::new("Ship class cannot be unknown"));
    }
    let Ship {
        color,
        ship_class,
        coordinates,
    } = ship;
    if !(0..BOARD_WIDTH).contains(&coordinates.x) {
        return Err(InvalidOperation::new(format!(
            "X coordinate is invalid for {ship_class}"
        )));
    }
    if !color.starting_rows().contains(&coordinates.y) {
        return Err(InvalidOperation::new(format!(
            "Y coordinate is invalid for {ship_class}"
        )));
    }
    Ok(())
}

/// Checks that `ship` may be positioned into `fleet`.
///
/// The square must be in the starting zone and not held by a different ship
/// of the same fleet. Re-positioning a ship onto its own square is allowed.
///
/// # Errors
///
/// Returns [`InvalidOperation`] on a zone violation, a color mismatch, or an
/// occupied square.
#[instrument(skip(fleet), fields(ship = %ship.id(), square = %ship.coordinates))]
pub fn validate_positioning(fleet: &Fleet, ship: &Ship) -> Result<(), InvalidOperation> {
    if ship.color != fleet.color() {
        return Err(InvalidOperation::new("Ship does not belong to player"));
    }
    validate_starting_position(ship)?;
    if let Some(occupant) = fleet.ship_at(ship.coordinates)
        && !occupant.is_same_ship(ship)
    {
        warn!(occupant = %occupant.id(), "Square already taken");
        return Err(InvalidOperation::new("Coordinates is already occupied"));
    }
    Ok(())
}

/// Checks that a fleet is complete, fully positioned and inside its zone.
///
/// # Errors
///
/// Returns [`InvalidOperation`] for the first problem found: a missing
/// ship, an unplaced ship, a ship outside the zone, or two ships sharing a
/// square.
#[instrument(skip(fleet), fields(color = %fleet.color(), ships = fleet.len()))]
pub fn validate_fleet(fleet: &Fleet) -> Result<(), InvalidOperation> {
    if fleet.len() != FLEET_SIZE {
        return Err(InvalidOperation::new(format!(
            "{} fleet must contain {FLEET_SIZE} ships",
            fleet.color()
        )));
    }
    if let Some(ship) = fleet.ships().iter().find(|s| !s.coordinates.is_placed()) {
        return Err(InvalidOperation::new(format!(
            "{} must be positioned",
            ship.ship_class
        )));
    }

    let mut taken = HashSet::with_capacity(FLEET_SIZE);
    for ship in fleet.ships() {
        validate_starting_position(ship)?;
        if !taken.insert(ship.coordinates) {
            return Err(InvalidOperation::new("Coordinates is already occupied"));
        }
    }

    debug!("Fleet is ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Coordinates, ShipClass};
    use proptest::prelude::*;

    fn ship(color: Color, x: i8, y: i8) -> Ship {
        Ship::new(color, ShipClass::NimitzSubclassAircraftCarrier, Coordinates::new(x, y))
    }

    /// Fills rows 0..=2 (white) or 5..=7 (black) left to right.
    fn deployed(color: Color) -> Fleet {
        let mut fleet = Fleet::unplaced(color);
        let first_row = *color.starting_rows().start();
        for (i, class) in ShipClass::fleet().enumerate() {
            let i = i as i8;
            let square = Coordinates::new(i % BOARD_WIDTH, first_row + i / BOARD_WIDTH);
            fleet.position(Ship::new(color, class, square));
        }
        fleet
    }

    #[test]
    fn test_zone_boundaries() {
        assert!(validate_starting_position(&ship(Color::White, 4, 2)).is_ok());
        assert!(validate_starting_position(&ship(Color::White, 4, 3)).is_err());
        assert!(validate_starting_position(&ship(Color::Black, 4, 5)).is_ok());
        assert!(validate_starting_position(&ship(Color::Black, 4, 4)).is_err());
    }

    #[test]
    fn test_zone_error_reasons() {
        let err = validate_starting_position(&ship(Color::White, 9, 0)).unwrap_err();
        assert_eq!(err.reason(), "X coordinate is invalid for Nimitz-subclass aircraft carrier");
        let err = validate_starting_position(&ship(Color::Black, 0, 3)).unwrap_err();
        assert_eq!(err.reason(), "Y coordinate is invalid for Nimitz-subclass aircraft carrier");
    }

    #[test]
    fn test_positioning_rejects_friendly_square() {
        let mut fleet = Fleet::unplaced(Color::White);
        fleet.position(ship(Color::White, 1, 1));
        let other = Ship::new(Color::White, ShipClass::KiddClassGuidedMissileDestroyer, Coordinates::new(1, 1));
        let err = validate_positioning(&fleet, &other).unwrap_err();
        assert_eq!(err.reason(), "Coordinates is already occupied");
        assert!(validate_positioning(&fleet, &ship(Color::White, 1, 1)).is_ok());
    }

    #[test]
    fn test_unplaced_fleet_is_rejected() {
        let err = validate_fleet(&Fleet::unplaced(Color::Black)).unwrap_err();
        assert_eq!(err.reason(), "Virginia-class attack submarine must be positioned");
    }

    #[test]
    fn test_deployed_fleets_are_ready() {
        assert!(validate_fleet(&deployed(Color::White)).is_ok());
        assert!(validate_fleet(&deployed(Color::Black)).is_ok());
    }

    #[test]
    fn test_incomplete_fleet_is_rejected() {
        let mut fleet = deployed(Color::White);
        fleet.remove(ShipClass::BlueRidgeClassCommandShip);
        assert_eq!(validate_fleet(&fleet).unwrap_err().reason(), "White fleet must contain 21 ships");
    }

    proptest! {
        #[test]
        fn prop_white_zone_is_rows_zero_to_two(x in 0i8..9, y in 0i8..8) {
            prop_assert_eq!(validate_starting_position(&ship(Color::White, x, y)).is_ok(), y <= 2);
            prop_assert_eq!(validate_starting_position(&ship(Color::Black, x, y)).is_ok(), y >= 5);
        }
    }
}
