//! Match rules.
//!
//! Pure functions over ships and fleets: combat arbitration, starting-zone
//! placement, movement legality and win detection. They never mutate their
//! inputs; callers apply the accepted change.

pub mod arbitration;
pub mod movement;
pub mod placement;
pub mod win;

pub use arbitration::{Outcome, arbitrate, winner};
pub use movement::validate_move;
pub use placement::{validate_fleet, validate_positioning, validate_starting_position};
pub use win::{Victory, VictoryReason, evaluate, is_breakthrough};
