//! Command of the Sea - command-line driver
//!
//! Runs match operations against a local SQLite database and prints the
//! result as JSON.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayerMatch, ShipMove};
use command_of_the_sea::{
    Color, ColorSource, Coordinates, EngineConfig, MatchService, MatchStore, RandomColors, Ship,
    SqliteMatchStore,
};
use serde::Serialize;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

type Service = MatchService<SqliteMatchStore, RandomColors>;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = SqliteMatchStore::open(config.database_path().clone())
        .with_context(|| format!("Failed to open database '{}'", config.database_path()))?;
    let colors = match config.color_seed() {
        Some(seed) => RandomColors::seeded(*seed),
        None => RandomColors::from_entropy(),
    };
    let service = MatchService::new(store, colors);

    run(&service, cli.command)
}

/// Builds the effective configuration: file, then command-line overrides.
fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(db) = &cli.db {
        config = config.with_database_path(db.clone());
    }
    if cli.seed.is_some() {
        config = config.with_color_seed(cli.seed);
    }
    Ok(config)
}

/// Dispatches one command.
#[instrument(skip(service))]
fn run(service: &Service, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            info!(path = %service.store().db_path(), "Database ready");
            print(&serde_json::json!({ "database": service.store().db_path() }))
        }
        Command::Host { player } => print(&service.host_match(&player)?),
        Command::Cancel(PlayerMatch { player, match_id }) => {
            service.cancel_match(&player, &match_id)?;
            print(&serde_json::json!({ "cancelled": match_id }))
        }
        Command::Connect(PlayerMatch { player, match_id }) => print(&service.connect(&player, &match_id)?),
        Command::Disconnect(PlayerMatch { player, match_id }) => {
            print(&service.disconnect(&player, &match_id)?)
        }
        Command::Position(args) => {
            let ship = requested_ship(service, &args)?;
            print(&service.position_ship(&args.target.player, &args.target.match_id, ship)?)
        }
        Command::Ready(PlayerMatch { player, match_id }) => print(&service.ready(&player, &match_id)?),
        Command::Start(PlayerMatch { player, match_id }) => print(&service.start_match(&player, &match_id)?),
        Command::Move(args) => {
            let ship = requested_ship(service, &args)?;
            print(&service.move_ship(&args.target.player, &args.target.match_id, ship)?)
        }
        Command::Resign(PlayerMatch { player, match_id }) => print(&service.resign(&player, &match_id)?),
        Command::Draw(PlayerMatch { player, match_id }) => print(&service.draw(&player, &match_id)?),
        Command::Delete(PlayerMatch { player, match_id }) => {
            service.delete_match(&player, &match_id)?;
            print(&serde_json::json!({ "deleted": match_id }))
        }
        Command::Show { match_id } => {
            let record = service
                .retrieve_match(&match_id)?
                .with_context(|| format!("No match {}", match_id))?;
            print(&record)
        }
        Command::Replay { match_id } => print(&service.replay(&match_id)?),
        Command::List { filter } => print(&service.list(filter.into())?),
    }
}

/// Ship described by the command line. The color defaults to the player's
/// seat in the match.
fn requested_ship<S: MatchStore, C: ColorSource>(
    service: &MatchService<S, C>,
    args: &ShipMove,
) -> Result<Ship> {
    let color = match args.color {
        Some(color) => color,
        None => seat_color(service, &args.target)?,
    };
    debug!(%color, ship_class = %args.ship_class, "Resolved requested ship");
    Ok(Ship::new(color, args.ship_class, Coordinates::new(args.x, args.y)))
}

/// Seat `target.player` holds in `target.match_id`.
fn seat_color<S: MatchStore, C: ColorSource>(
    service: &MatchService<S, C>,
    target: &PlayerMatch,
) -> Result<Color> {
    let record = service
        .retrieve_match(&target.match_id)?
        .with_context(|| format!("No match {}", target.match_id))?;
    record.color_of(&target.player).with_context(|| {
        format!(
            "Player {} has no seat in match {}; pass --color to name the ship's side",
            target.player, target.match_id
        )
    })
}

fn print(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_of_the_sea::{InMemoryMatchStore, MatchId, PlayerId, ScriptedColors, ShipClass};

    fn ship_move(player: &str, match_id: MatchId, color: Option<Color>) -> ShipMove {
        ShipMove {
            target: PlayerMatch {
                player: PlayerId::new(player).unwrap(),
                match_id,
            },
            ship_class: ShipClass::KiddClassGuidedMissileDestroyer,
            x: 4,
            y: 5,
            color,
        }
    }

    #[test]
    fn test_requested_ship_uses_seat_color() {
        let service = MatchService::new(InMemoryMatchStore::new(), ScriptedColors::always(Color::Black));
        let hosted = service.host_match(&PlayerId::new("alice").unwrap()).unwrap();

        let ship = requested_ship(&service, &ship_move("alice", *hosted.uuid(), None)).unwrap();
        assert_eq!(ship.color, Color::Black);
        assert_eq!(ship.coordinates, Coordinates::new(4, 5));
    }

    #[test]
    fn test_requested_ship_rejects_unseated_player() {
        let service = MatchService::new(InMemoryMatchStore::new(), ScriptedColors::default());
        let hosted = service.host_match(&PlayerId::new("alice").unwrap()).unwrap();

        let err = requested_ship(&service, &ship_move("carol", *hosted.uuid(), None)).unwrap_err();
        assert!(err.to_string().contains("has no seat"));

        let explicit = requested_ship(&service, &ship_move("carol", *hosted.uuid(), Some(Color::White))).unwrap();
        assert_eq!(explicit.color, Color::White);
    }

    #[test]
    fn test_requested_ship_unknown_match() {
        let service = MatchService::new(InMemoryMatchStore::new(), ScriptedColors::default());
        let err = requested_ship(&service, &ship_move("alice", MatchId::new(), None)).unwrap_err();
        assert!(err.to_string().starts_with("No match"));
    }
}
