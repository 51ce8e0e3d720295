//! Command of the Sea rules.
//!
//! Pure game logic for a two-player hidden-identity naval strategy game on a
//! 9×8 grid. Each side commands 21 ranked ships; collisions are arbitrated
//! by rank with a few fixed overrides, and a match ends when a command ship
//! is sunk or breaks through to the enemy home row.
//!
//! This crate has no I/O. Match lifecycle and persistence live in the
//! `command_of_the_sea` crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod fleet;
pub mod rules;
mod types;

pub use error::InvalidOperation;
pub use fleet::{Fleet, Fleets};
pub use rules::{
    Outcome, Victory, VictoryReason, arbitrate, evaluate, validate_fleet, validate_move,
    validate_positioning, validate_starting_position,
};
pub use types::{
    BOARD_HEIGHT, BOARD_WIDTH, Color, Coordinates, FLEET_SIZE, Ship, ShipClass, ShipId,
};
