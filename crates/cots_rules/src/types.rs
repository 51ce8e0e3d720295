//! Core domain types: colors, ship classes, grid coordinates and ships.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// Number of columns on the board (x in `0..=8`).
pub const BOARD_WIDTH: i8 = 9;

/// Number of rows on the board (y in `0..=7`).
pub const BOARD_HEIGHT: i8 = 8;

/// Number of ships in a complete fleet.
pub const FLEET_SIZE: usize = 21;

/// Side of the board a ship belongs to.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Color {
    /// White side, home row 0.
    #[display("White")]
    White,
    /// Black side, home row 7.
    #[display("Black")]
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row this color defends.
    pub fn home_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => BOARD_HEIGHT - 1,
        }
    }

    /// Row a command ship of this color must reach for a breakthrough.
    pub fn enemy_home_row(self) -> i8 {
        self.opponent().home_row()
    }

    /// Inclusive range of rows this color may deploy into.
    pub fn starting_rows(self) -> std::ops::RangeInclusive<i8> {
        match self {
            Color::White => 0..=2,
            Color::Black => 5..=7,
        }
    }
}

/// Class of a ship. Every real class carries a combat rank.
///
/// Two submarine slots and six littoral combat ship slots share a name and
/// a rank; they are distinct classes so a fleet holds exactly one ship per
/// variant. [`ShipClass::Unknown`] only ever appears in masked views.
#[derive(
    Debug,
    Display,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ShipClass {
    /// Virginia-class attack submarine, first slot.
    #[display("Virginia-class attack submarine")]
    VirginiaClassAttackSubmarine0,
    /// Virginia-class attack submarine, second slot.
    #[display("Virginia-class attack submarine")]
    VirginiaClassAttackSubmarine1,
    /// Gerald R. Ford-class aircraft carrier.
    #[display("Gerald R. Ford-class aircraft carrier")]
    GeraldFordClassAircraftCarrier,
    /// Ronald Reagan-subclass aircraft carrier.
    #[display("Ronald Reagan-subclass aircraft carrier")]
    RonaldReaganSubclassAircraftCarrier,
    /// Theodore Roosevelt-subclass aircraft carrier.
    #[display("Theodore Roosevelt-subclass aircraft carrier")]
    TheodoreRooseveltSubclassAircraftCarrier,
    /// Nimitz-subclass aircraft carrier.
    #[display("Nimitz-subclass aircraft carrier")]
    NimitzSubclassAircraftCarrier,
    /// Enterprise-class aircraft carrier.
    #[display("Enterprise-class aircraft carrier")]
    EnterpriseClassAircraftCarrier,
    /// America-class amphibious assault ship.
    #[display("America-class amphibious assault ship")]
    AmericaClassAmphibiousAssaultShip,
    /// Wasp-class amphibious assault ship.
    #[display("Wasp-class amphibious assault ship")]
    WaspClassAmphibiousAssaultShip,
    /// Tarawa-class amphibious assault ship.
    #[display("Tarawa-class amphibious assault ship")]
    TarawaClassAmphibiousAssaultShip,
    /// Zumwalt-class guided missile destroyer.
    #[display("Zumwalt-class guided missile destroyer")]
    ZumwaltClassGuidedMissileDestroyer,
    /// Arleigh Burke-class guided missile destroyer.
    #[display("Arleigh Burke-class guided missile destroyer")]
    ArleighBurkeClassGuidedMissileDestroyer,
    /// Kidd-class guided missile destroyer.
    #[display("Kidd-class guided missile destroyer")]
    KiddClassGuidedMissileDestroyer,
    /// Ticonderoga-class guided missile cruiser.
    #[display("Ticonderoga-class guided missile cruiser")]
    TiconderogaClassGuidedMissileCruiser,
    /// Independence-class littoral combat ship, slot 0.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip0,
    /// Independence-class littoral combat ship, slot 1.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip1,
    /// Independence-class littoral combat ship, slot 2.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip2,
    /// Independence-class littoral combat ship, slot 3.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip3,
    /// Independence-class littoral combat ship, slot 4.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip4,
    /// Independence-class littoral combat ship, slot 5.
    #[display("Independence-class littoral combat ship")]
    IndependenceClassLittoralCombatShip5,
    /// Blue Ridge-class command ship.
    #[display("Blue Ridge-class command ship")]
    BlueRidgeClassCommandShip,
    /// Hidden identity.
    #[display("Unknown ship")]
    Unknown,
}

impl ShipClass {
    /// Rank used for arbitration; `None` for [`ShipClass::Unknown`].
    pub fn rank(self) -> Option<u8> {
        use ShipClass::*;
        let rank = match self {
            VirginiaClassAttackSubmarine0 | VirginiaClassAttackSubmarine1 => 14,
            GeraldFordClassAircraftCarrier => 13,
            RonaldReaganSubclassAircraftCarrier => 12,
            TheodoreRooseveltSubclassAircraftCarrier => 11,
            NimitzSubclassAircraftCarrier => 10,
            EnterpriseClassAircraftCarrier => 9,
            AmericaClassAmphibiousAssaultShip => 8,
            WaspClassAmphibiousAssaultShip => 7,
            TarawaClassAmphibiousAssaultShip => 6,
            ZumwaltClassGuidedMissileDestroyer => 5,
            ArleighBurkeClassGuidedMissileDestroyer => 4,
            KiddClassGuidedMissileDestroyer => 3,
            TiconderogaClassGuidedMissileCruiser => 2,
            IndependenceClassLittoralCombatShip0
            | IndependenceClassLittoralCombatShip1
            | IndependenceClassLittoralCombatShip2
            | IndependenceClassLittoralCombatShip3
            | IndependenceClassLittoralCombatShip4
            | IndependenceClassLittoralCombatShip5 => 1,
            BlueRidgeClassCommandShip => 0,
            Unknown => return None,
        };
        Some(rank)
    }

    /// True for either submarine slot.
    pub fn is_submarine(self) -> bool {
        self.rank() == Some(14)
    }

    /// True for any of the six littoral combat ship slots.
    pub fn is_littoral_combat_ship(self) -> bool {
        self.rank() == Some(1)
    }

    /// True for the command ship.
    pub fn is_command_ship(self) -> bool {
        self == ShipClass::BlueRidgeClassCommandShip
    }

    /// True for the masking placeholder.
    pub fn is_unknown(self) -> bool {
        self == ShipClass::Unknown
    }

    /// The 21 real classes making up a fleet, in declaration order.
    pub fn fleet() -> impl Iterator<Item = ShipClass> {
        ShipClass::iter().filter(|class| !class.is_unknown())
    }
}

/// A square on the board, or the unplaced sentinel `(-1, -1)`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("({}, {})", x, y)]
pub struct Coordinates {
    /// Column, 0 to 8.
    pub x: i8,
    /// Row, 0 to 7.
    pub y: i8,
}

impl Coordinates {
    /// Sentinel for a ship that has not been positioned yet.
    pub const UNPLACED: Coordinates = Coordinates { x: -1, y: -1 };

    /// Creates coordinates without validating them.
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// True unless these are the unplaced sentinel.
    pub fn is_placed(&self) -> bool {
        *self != Self::UNPLACED
    }

    /// True if both axes are inside the 9×8 grid.
    pub fn is_on_board(&self) -> bool {
        (0..BOARD_WIDTH).contains(&self.x) && (0..BOARD_HEIGHT).contains(&self.y)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::UNPLACED
    }
}

/// Engine identity of a ship. Coordinates change, identity does not.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[display("{} {}", color, ship_class)]
pub struct ShipId {
    /// Owning side.
    pub color: Color,
    /// Class slot.
    pub ship_class: ShipClass,
}

/// A ship at a position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ship {
    /// Owning side.
    pub color: Color,
    /// Class, or [`ShipClass::Unknown`] in a masked view.
    pub ship_class: ShipClass,
    /// Current square.
    pub coordinates: Coordinates,
}

impl Ship {
    /// Creates a ship.
    pub fn new(color: Color, ship_class: ShipClass, coordinates: Coordinates) -> Self {
        Self {
            color,
            ship_class,
            coordinates,
        }
    }

    /// Creates a ship that has not been positioned.
    pub fn unplaced(color: Color, ship_class: ShipClass) -> Self {
        Self::new(color, ship_class, Coordinates::UNPLACED)
    }

    /// Identity of this ship, ignoring coordinates.
    pub fn id(&self) -> ShipId {
        ShipId {
            color: self.color,
            ship_class: self.ship_class,
        }
    }

    /// True if `other` is the same ship, wherever it stands.
    pub fn is_same_ship(&self, other: &Ship) -> bool {
        self.id() == other.id()
    }

    /// Returns a copy moved to `coordinates`.
    pub fn at(self, coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            ..self
        }
    }

    /// Returns a copy with the class hidden.
    pub fn masked(self) -> Self {
        Self {
            ship_class: ShipClass::Unknown,
            ..self
        }
    }
}
