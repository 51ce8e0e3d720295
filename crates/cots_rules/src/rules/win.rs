//! Win detection, run after every accepted move.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::fleet::{Fleet, Fleets};
use crate::types::Color;

/// How a match was won on the board.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryReason {
    /// Command ship reached the enemy home row unchallenged.
    #[display("breakthrough")]
    Breakthrough,
    /// The losing fleet no longer has its command ship.
    #[display("elimination")]
    Elimination,
    /// An enemy command ship survived a full turn on the loser's home row.
    #[display("base penetration")]
    BasePenetration,
}

/// A decided match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victory {
    /// Winning side.
    pub winner: Color,
    /// Rule that decided it.
    pub reason: VictoryReason,
}

impl Victory {
    fn new(winner: Color, reason: VictoryReason) -> Self {
        Self { winner, reason }
    }
}

/// Evaluates the board after `mover` has moved and combat has resolved.
///
/// Rules are tried in order and the first that applies decides:
/// breakthrough by the mover, elimination of either command ship
/// (opponent's first), then base penetration by the opponent.
#[instrument(skip(fleets))]
pub fn evaluate(fleets: &Fleets, mover: Color) -> Option<Victory> {
    let opponent = mover.opponent();
    let own = fleets.fleet(mover);
    let enemy = fleets.fleet(opponent);

    let victory = if is_breakthrough(own, enemy) {
        Some(Victory::new(mover, VictoryReason::Breakthrough))
    } else if enemy.command_ship().is_none() {
        Some(Victory::new(mover, VictoryReason::Elimination))
    } else if own.command_ship().is_none() {
        Some(Victory::new(opponent, VictoryReason::Elimination))
    } else if enemy
        .command_ship()
        .is_some_and(|ship| ship.coordinates.y == mover.home_row())
    {
        Some(Victory::new(opponent, VictoryReason::BasePenetration))
    } else {
        None
    };

    debug!(?victory, "Win conditions evaluated");
    victory
}

/// True if `own`'s command ship sits on the enemy home row with no enemy
/// ship beside it on that row.
#[instrument(skip(own, enemy), fields(color = %own.color()))]
pub fn is_breakthrough(own: &Fleet, enemy: &Fleet) -> bool {
    let Some(command) = own.command_ship() else {
        return false;
    };
    let row = own.color().enemy_home_row();
    if command.coordinates.y != row {
        return false;
    }
    let x = command.coordinates.x;
    !enemy
        .ships()
        .iter()
        .any(|s| s.coordinates.y == row && (s.coordinates.x == x - 1 || s.coordinates.x == x + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coordinates, Ship, ShipClass};

    const COMMAND: ShipClass = ShipClass::BlueRidgeClassCommandShip;

    /// Fleets holding only their command ships at the given squares.
    fn command_ships(white: (i8, i8), black: (i8, i8)) -> Fleets {
        let mut fleets = Fleets::unplaced();
        for color in [Color::White, Color::Black] {
            let classes: Vec<_> = fleets.fleet(color).ships().iter().map(|s| s.ship_class).collect();
            for class in classes {
                fleets.fleet_mut(color).remove(class);
            }
        }
        fleets
            .white
            .position(Ship::new(Color::White, COMMAND, Coordinates::new(white.0, white.1)));
        fleets
            .black
            .position(Ship::new(Color::Black, COMMAND, Coordinates::new(black.0, black.1)));
        fleets
    }

    #[test]
    fn test_no_victory_midfield() {
        let fleets = command_ships((4, 3), (4, 5));
        assert_eq!(evaluate(&fleets, Color::White), None);
    }

    #[test]
    fn test_unchallenged_breakthrough() {
        let fleets = command_ships((4, 7), (0, 5));
        assert_eq!(
            evaluate(&fleets, Color::White),
            Some(Victory::new(Color::White, VictoryReason::Breakthrough))
        );
    }

    #[test]
    fn test_challenged_breakthrough_waits() {
        let mut fleets = command_ships((4, 7), (0, 5));
        fleets.black.position(Ship::new(
            Color::Black,
            ShipClass::KiddClassGuidedMissileDestroyer,
            Coordinates::new(5, 7),
        ));
        assert_eq!(evaluate(&fleets, Color::White), None);
    }

    #[test]
    fn test_surviving_intruder_wins_for_opponent() {
        // Black's command ship reached row 0 last turn; white failed to sink it.
        let fleets = command_ships((8, 3), (2, 0));
        assert_eq!(
            evaluate(&fleets, Color::White),
            Some(Victory::new(Color::Black, VictoryReason::BasePenetration))
        );
    }

    #[test]
    fn test_elimination_of_either_side() {
        let mut fleets = command_ships((4, 3), (4, 4));
        fleets.black.remove(COMMAND);
        assert_eq!(
            evaluate(&fleets, Color::White),
            Some(Victory::new(Color::White, VictoryReason::Elimination))
        );

        let mut fleets = command_ships((4, 3), (4, 4));
        fleets.white.remove(COMMAND);
        assert_eq!(
            evaluate(&fleets, Color::White),
            Some(Victory::new(Color::Black, VictoryReason::Elimination))
        );
    }
}
