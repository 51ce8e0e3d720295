//! Command of the Sea match engine.
//!
//! Runs the lifecycle of two-player naval strategy matches on top of the
//! pure rules in [`cots_rules`].
//!
//! # Architecture
//!
//! - **Service**: [`MatchService`], the match state machine
//! - **Record**: [`Match`], the persisted match and its [`History`]
//! - **Store**: [`MatchStore`] with in-memory and SQLite implementations
//! - **Colors**: [`ColorSource`], the injected coin for seats and first turn
//!
//! # Example
//!
//! ```
//! use command_of_the_sea::{InMemoryMatchStore, MatchService, Phase, PlayerId, ScriptedColors};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = MatchService::new(InMemoryMatchStore::new(), ScriptedColors::default());
//! let alice = PlayerId::new("alice")?;
//! let bob = PlayerId::new("bob")?;
//!
//! let hosted = service.host_match(&alice)?;
//! let joined = service.connect(&bob, hosted.uuid())?;
//! assert_eq!(joined.phase(), Phase::FleetSetup);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod colors;
mod config;
mod db;
mod error;
mod history;
mod ids;
mod record;
mod service;

// Crate-level exports - Rules
pub use cots_rules::{
    BOARD_HEIGHT, BOARD_WIDTH, Color, Coordinates, FLEET_SIZE, Fleet, Fleets, InvalidOperation,
    Outcome, Ship, ShipClass, ShipId, Victory, VictoryReason,
};

// Crate-level exports - Match service
pub use colors::{ColorSource, RandomColors, ScriptedColors};
pub use service::{MatchService, MoveReport};

// Crate-level exports - Match record
pub use history::{History, TurnSnapshot};
pub use ids::{MatchId, PlayerId};
pub use record::{Match, Phase};

// Crate-level exports - Persistence
pub use db::{InMemoryMatchStore, MatchFilter, MatchStore, SqliteMatchStore, StoreError, StoreErrorKind};

// Crate-level exports - Errors and configuration
pub use config::{ConfigError, EngineConfig};
pub use error::MatchError;
