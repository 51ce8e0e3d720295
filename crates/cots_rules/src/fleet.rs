//! Fleets: the ships one side owns, and the pair of fleets in a match.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{Color, Coordinates, FLEET_SIZE, Ship, ShipClass};

/// The ships belonging to one color.
///
/// Holds at most one ship per [`ShipClass`]. A fresh fleet has all 21 ships
/// at the unplaced sentinel; combat removes ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    color: Color,
    ships: Vec<Ship>,
}

impl Fleet {
    /// Creates a full fleet with every ship unplaced.
    #[instrument]
    pub fn unplaced(color: Color) -> Self {
        let ships = ShipClass::fleet()
            .map(|class| Ship::unplaced(color, class))
            .collect();
        Self { color, ships }
    }

    /// Owning color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Ships in class order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of ships still afloat.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// True if every ship has been sunk.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Looks up a ship by class.
    pub fn get(&self, class: ShipClass) -> Option<&Ship> {
        self.ships.iter().find(|s| s.ship_class == class)
    }

    /// Ship occupying `coordinates`, if any. Never matches the sentinel.
    pub fn ship_at(&self, coordinates: Coordinates) -> Option<&Ship> {
        if !coordinates.is_placed() {
            return None;
        }
        self.ships.iter().find(|s| s.coordinates == coordinates)
    }

    /// The command ship, if it is still afloat.
    pub fn command_ship(&self) -> Option<&Ship> {
        self.get(ShipClass::BlueRidgeClassCommandShip)
    }

    /// True once every ship has left the unplaced sentinel.
    pub fn is_fully_positioned(&self) -> bool {
        self.ships.len() == FLEET_SIZE && self.ships.iter().all(|s| s.coordinates.is_placed())
    }

    /// Overwrites the coordinates of the ship with the same identity.
    ///
    /// Inserts the ship if its class is missing, keeping class order, so
    /// repeated positioning never duplicates a ship.
    pub fn position(&mut self, ship: Ship) {
        debug_assert_eq!(ship.color, self.color);
        match self.ships.iter_mut().find(|s| s.is_same_ship(&ship)) {
            Some(existing) => existing.coordinates = ship.coordinates,
            None => {
                self.ships.push(ship);
                self.ships.sort_by_key(|s| s.ship_class);
            }
        }
    }

    /// Removes a ship by class, returning it if it was afloat.
    pub fn remove(&mut self, class: ShipClass) -> Option<Ship> {
        let idx = self.ships.iter().position(|s| s.ship_class == class)?;
        Some(self.ships.remove(idx))
    }

    /// Copy of this fleet with every class hidden.
    pub fn masked(&self) -> Self {
        Self {
            color: self.color,
            ships: self.ships.iter().map(|s| s.masked()).collect(),
        }
    }
}

/// Both sides' fleets, owned per color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleets {
    /// White fleet.
    pub white: Fleet,
    /// Black fleet.
    pub black: Fleet,
}

impl Fleets {
    /// Two full fleets with every ship unplaced.
    pub fn unplaced() -> Self {
        Self {
            white: Fleet::unplaced(Color::White),
            black: Fleet::unplaced(Color::Black),
        }
    }

    /// Fleet of `color`.
    pub fn fleet(&self, color: Color) -> &Fleet {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Mutable fleet of `color`.
    pub fn fleet_mut(&mut self, color: Color) -> &mut Fleet {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Copy as seen by `viewer`: the opponent's classes are hidden.
    pub fn as_seen_by(&self, viewer: Color) -> Self {
        let mut view = self.clone();
        let hidden = view.fleet(viewer.opponent()).masked();
        *view.fleet_mut(viewer.opponent()) = hidden;
        view
    }
}

impl Default for Fleets {
    fn default() -> Self {
        Self::unplaced()
    }
}
