//! Command-line interface for the `cots` driver.

use clap::{Args, Parser, Subcommand, ValueEnum};

use command_of_the_sea::{Color, MatchFilter, MatchId, PlayerId, ShipClass};

/// Command of the Sea - match rules engine over a local SQLite store
#[derive(Parser, Debug)]
#[command(name = "cots")]
#[command(about = "Play Command of the Sea matches against a local database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// SQLite database file (overrides the config file)
    #[arg(long)]
    pub db: Option<String>,

    /// Seed for color draws (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and apply migrations
    Init,

    /// Host a new match
    Host {
        /// Hosting player
        #[arg(short, long)]
        player: PlayerId,
    },

    /// Cancel an unstarted match (host only)
    Cancel(PlayerMatch),

    /// Take the free seat of a match
    Connect(PlayerMatch),

    /// Leave a match before it starts
    Disconnect(PlayerMatch),

    /// Place a ship in the starting zone
    Position(ShipMove),

    /// Lock in a fully positioned fleet
    Ready(PlayerMatch),

    /// Start a match once both sides are ready (host only)
    Start(PlayerMatch),

    /// Move a ship one square
    Move(ShipMove),

    /// Concede the match
    Resign(PlayerMatch),

    /// Offer or accept a draw
    Draw(PlayerMatch),

    /// Delete a match (host only)
    Delete(PlayerMatch),

    /// Print a match record
    Show {
        /// Match to show
        #[arg(short, long = "match")]
        match_id: MatchId,
    },

    /// Print the turn history of a concluded match
    Replay {
        /// Match to replay
        #[arg(short, long = "match")]
        match_id: MatchId,
    },

    /// List matches
    List {
        /// Which matches to list
        #[arg(short, long, value_enum, default_value_t = ListFilter::Unstarted)]
        filter: ListFilter,
    },
}

/// Player acting on a match
#[derive(Args, Debug)]
pub struct PlayerMatch {
    /// Acting player
    #[arg(short, long)]
    pub player: PlayerId,

    /// Target match
    #[arg(short, long = "match")]
    pub match_id: MatchId,
}

/// A ship and the square it should stand on
#[derive(Args, Debug)]
pub struct ShipMove {
    /// Acting player and target match
    #[command(flatten)]
    pub target: PlayerMatch,

    /// Ship class, by variant name (e.g. BlueRidgeClassCommandShip)
    #[arg(short = 's', long = "class")]
    pub ship_class: ShipClass,

    /// Destination column, 0 to 8
    #[arg(short, allow_negative_numbers = true)]
    pub x: i8,

    /// Destination row, 0 to 7
    #[arg(short, allow_negative_numbers = true)]
    pub y: i8,

    /// Ship color; defaults to the player's seat
    #[arg(long)]
    pub color: Option<Color>,
}

/// Listing filter
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFilter {
    /// Not yet started
    Unstarted,
    /// In progress
    Active,
    /// Concluded
    Finished,
}

impl From<ListFilter> for MatchFilter {
    fn from(filter: ListFilter) -> Self {
        match filter {
            ListFilter::Unstarted => MatchFilter::Unstarted,
            ListFilter::Active => MatchFilter::Active,
            ListFilter::Finished => MatchFilter::Finished,
        }
    }
}
