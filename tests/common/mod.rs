//! Shared fixtures for match service tests.

#![allow(dead_code)]

use command_of_the_sea::{
    Color, ColorSource, Coordinates, Match, MatchId, MatchService, MatchStore, PlayerId, Ship,
    ShipClass,
};

/// Builds a player ID.
pub fn player(name: &str) -> PlayerId {
    PlayerId::new(name).expect("valid player id")
}

/// Default deployment square for the `index`th ship of `color`.
///
/// White fills rows 0 and 1 and the left of row 2; black mirrors it from
/// row 7 down. The command ship, last in fleet order, lands on (2, 2) for
/// white and (2, 5) for black.
pub fn home_square(color: Color, index: usize) -> Coordinates {
    let x = (index % 9) as i8;
    let row = (index / 9) as i8;
    match color {
        Color::White => Coordinates::new(x, row),
        Color::Black => Coordinates::new(x, 7 - row),
    }
}

/// Positions every ship of `player`'s fleet on its default square.
pub fn deploy<S: MatchStore, C: ColorSource>(
    service: &MatchService<S, C>,
    player: &PlayerId,
    id: &MatchId,
    color: Color,
) {
    for (index, class) in ShipClass::fleet().enumerate() {
        let ship = Ship::new(color, class, home_square(color, index));
        service
            .position_ship(player, id, ship)
            .unwrap_or_else(|e| panic!("positioning {class} failed: {e}"));
    }
}

/// Hosts a match for `white` and `black`, deploys both fleets with the
/// given overrides, readies both sides and starts the match.
///
/// The color source must yield White for the host seat and then the
/// opening turn.
pub fn started_match<S: MatchStore, C: ColorSource>(
    service: &MatchService<S, C>,
    white: &PlayerId,
    black: &PlayerId,
    overrides: &[Ship],
) -> Match {
    let hosted = service.host_match(white).expect("host");
    let id = *hosted.uuid();
    assert_eq!(hosted.color_of(white), Some(Color::White), "host must be white");
    service.connect(black, &id).expect("connect");

    deploy(service, white, &id, Color::White);
    deploy(service, black, &id, Color::Black);
    for ship in overrides {
        let owner = match ship.color {
            Color::White => white,
            Color::Black => black,
        };
        service.position_ship(owner, &id, *ship).expect("override");
    }

    service.ready(white, &id).expect("white ready");
    service.ready(black, &id).expect("black ready");
    service.start_match(white, &id).expect("start")
}

/// Ship of `color` and `class` bound for (`x`, `y`).
pub fn ship(color: Color, class: ShipClass, x: i8, y: i8) -> Ship {
    Ship::new(color, class, Coordinates::new(x, y))
}
