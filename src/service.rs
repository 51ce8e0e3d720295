//! The match state machine.
//!
//! [`MatchService`] owns every transition of a [`Match`]: hosting, seating,
//! fleet setup, readiness, start, turns, resignation and draws. Each
//! operation reads the record from the store, validates against the rules,
//! and writes the whole record back with a conditional write. A rejected
//! operation returns before the write, so the stored match is untouched.

use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use cots_rules::{
    Color, Coordinates, Fleet, Fleets, Outcome, Ship, ShipId, Victory, arbitrate, evaluate,
    validate_fleet, validate_move, validate_positioning,
};

use crate::colors::ColorSource;
use crate::db::{MatchFilter, MatchStore};
use crate::error::{MatchError, invalid, rejected};
use crate::history::{History, TurnSnapshot};
use crate::ids::{MatchId, PlayerId};
use crate::record::Match;

/// Result of an accepted move, as seen by the player who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveReport {
    /// Turn number just played, starting at 1.
    turn: u32,
    /// Ship that moved.
    ship: ShipId,
    /// Square it left.
    from: Coordinates,
    /// Square it entered.
    to: Coordinates,
    /// Combat result if the square was held by an enemy.
    combat: Option<Outcome>,
    /// Set if this move decided the match.
    victory: Option<Victory>,
    /// Both fleets, the opponent's classes masked.
    fleets: Fleets,
    /// Side to move next, `None` once the match is over.
    next_turn: Option<Color>,
}

/// Runs match operations against a [`MatchStore`].
///
/// Stateless between calls apart from the color source. Concurrent callers
/// on the same match are serialized by the store's conditional write: the
/// loser of a race gets a conflict error and nothing is committed for it.
pub struct MatchService<S, C> {
    store: S,
    colors: Mutex<C>,
}

impl<S, C> std::fmt::Debug for MatchService<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchService").finish_non_exhaustive()
    }
}

impl<S: MatchStore, C: ColorSource> MatchService<S, C> {
    /// Creates a service over `store`, drawing colors from `colors`.
    pub fn new(store: S, colors: C) -> Self {
        Self {
            store,
            colors: Mutex::new(colors),
        }
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a match with `host` in a randomly drawn seat.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the record cannot be created.
    #[instrument(skip(self), fields(player_id = %host))]
    pub fn host_match(&self, host: &PlayerId) -> Result<Match, MatchError> {
        let color = self.draw_color();
        let record = Match::hosted(MatchId::new(), host.clone(), color, Utc::now());
        self.store.create(&record)?;
        info!(match_id = %record.uuid(), %color, "Match hosted");
        Ok(record)
    }

    /// Deletes an unstarted match. Only the host may cancel.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, already
    /// started, or not hosted by `player`.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn cancel_match(&self, player: &PlayerId, id: &MatchId) -> Result<(), MatchError> {
        let record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        if !record.is_host(player) {
            return Err(invalid("Player did not create this match"));
        }
        self.store.delete(id)?;
        info!("Match cancelled");
        Ok(())
    }

    /// Seats `player` in the free seat and draws who moves first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, started,
    /// full, or already seats `player`.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn connect(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        if record.color_of(player).is_some() {
            return Err(invalid("Player is already in the match"));
        }
        let seat = if record.white_player.is_none() {
            Color::White
        } else if record.black_player.is_none() {
            Color::Black
        } else {
            return Err(invalid("Match already has 2 players"));
        };

        *record.seat_mut(seat) = Some(player.clone());
        let turn = self.draw_color();
        record.turn = Some(turn);

        let record = self.store.write(&record)?;
        info!(color = %seat, %turn, "Player connected");
        Ok(record)
    }

    /// Frees `player`'s seat before the match starts.
    ///
    /// The leaving side's fleet, readiness and draw offer are reset. A host
    /// who leaves keeps ownership of the match and may still cancel it.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown or started, or
    /// `player` is not seated.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn disconnect(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        let Some(color) = record.color_of(player) else {
            return Err(invalid("Player is not in the match"));
        };

        *record.seat_mut(color) = None;
        *record.ready_mut(color) = false;
        *record.draw_offer_mut(color) = false;
        *record.fleets.fleet_mut(color) = Fleet::unplaced(color);
        record.turn = None;

        let record = self.store.write(&record)?;
        info!(%color, "Player disconnected");
        Ok(record)
    }

    /// Places one of `player`'s ships in their starting zone.
    ///
    /// Positioning the same class again moves it; the fleet never grows.
    /// Returns both fleets with the opponent's classes masked.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, started or
    /// still missing a player, `player` is not seated or already ready, or
    /// the ship is not theirs, outside the zone, or on a taken square.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id, ship = %ship.id(), square = %ship.coordinates))]
    pub fn position_ship(&self, player: &PlayerId, id: &MatchId, ship: Ship) -> Result<Fleets, MatchError> {
        let mut record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        let color = self.seat_of(&record, player)?;
        if !record.has_both_players() {
            return Err(invalid("Match is waiting for a second player"));
        }
        if record.is_ready(color) {
            return Err(invalid("Player is already ready"));
        }

        let fleet = record.fleets.fleet_mut(color);
        validate_positioning(fleet, &ship).map_err(rejected)?;
        fleet.position(ship);

        let record = self.store.write(&record)?;
        debug!(%color, "Ship positioned");
        Ok(record.fleets.as_seen_by(color))
    }

    /// Locks in `player`'s fleet once all 21 ships stand in their zone.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown or started,
    /// `player` is not seated, or the fleet is incomplete or invalid.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn ready(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        let color = self.seat_of(&record, player)?;

        let fleet = record.fleets.fleet(color);
        if !fleet.is_fully_positioned() {
            return Err(invalid("All ships must be positioned"));
        }
        validate_fleet(fleet).map_err(rejected)?;
        *record.ready_mut(color) = true;

        let record = self.store.write(&record)?;
        info!(%color, "Player ready");
        Ok(record)
    }

    /// Starts a match whose two sides are ready. Host only.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown or started,
    /// `player` is not seated, a side is not ready, or `player` is not the
    /// host.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn start_match(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        if record.started {
            return Err(invalid("Match has already started"));
        }
        self.seat_of(&record, player)?;
        if !(record.white_player_ready && record.black_player_ready) {
            return Err(invalid("Both players must be ready"));
        }
        if !record.is_host(player) {
            return Err(invalid("Only the host can start the match"));
        }

        if record.turn.is_none() {
            record.turn = Some(self.draw_color());
        }
        record.started = true;
        record.start_date = Some(Utc::now());

        let record = self.store.write(&record)?;
        info!(turn = ?record.turn(), "Match started");
        Ok(record)
    }

    /// Plays one turn: moves `ship` to its new coordinates, resolves any
    /// combat on the destination, passes the turn and checks for a win.
    ///
    /// `ship` carries the mover's color, the class to move and the
    /// destination square.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, not started
    /// or over, `player` is not seated or not on turn, or the move is
    /// illegal.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id, ship = %ship.id(), to = %ship.coordinates))]
    pub fn move_ship(&self, player: &PlayerId, id: &MatchId, ship: Ship) -> Result<MoveReport, MatchError> {
        let mut record = self.load(id)?;
        if !record.started {
            return Err(invalid("Match has not yet started"));
        }
        if record.is_concluded() {
            return Err(invalid("Game over"));
        }
        let mover = self.seat_of(&record, player)?;
        if let Some(turn) = record.turn
            && turn != mover
        {
            return Err(invalid(format!("{turn} player has the turn")));
        }
        if ship.color != mover {
            return Err(invalid("Ship does not belong to player"));
        }

        let Some(current) = record.fleets.fleet(mover).get(ship.ship_class).copied() else {
            return Err(invalid(format!("{} is no longer in play", ship.ship_class)));
        };
        validate_move(&current, &ship, record.fleets.fleet(mover)).map_err(rejected)?;

        let moved = current.at(ship.coordinates);
        let enemy = mover.opponent();
        let combat = match record.fleets.fleet(enemy).ship_at(moved.coordinates).copied() {
            Some(defender) => {
                let outcome = arbitrate(&moved, &defender).map_err(rejected)?;
                info!(attacker = %moved.id(), defender = %defender.id(), ?outcome, "Combat resolved");
                resolve(&mut record.fleets, moved, defender, outcome);
                Some(outcome)
            }
            None => {
                record.fleets.fleet_mut(mover).position(moved);
                None
            }
        };

        let now = Utc::now();
        let number = record.history.next_turn();
        record.history.append(TurnSnapshot {
            turn: number,
            mover,
            ship: moved.id(),
            from: current.coordinates,
            to: moved.coordinates,
            combat,
            fleets: record.fleets.clone(),
            played_at: now,
        });

        let victory = evaluate(&record.fleets, mover);
        match victory {
            Some(victory) => {
                record.conclude_with_winner(victory.winner, now);
                record.turn = None;
                info!(winner = %victory.winner, reason = %victory.reason, "Match won");
            }
            None => record.turn = Some(enemy),
        }

        let record = self.store.write(&record)?;
        debug!(turn = number, "Move committed");
        Ok(MoveReport::new(
            number,
            moved.id(),
            current.coordinates,
            moved.coordinates,
            combat,
            victory,
            record.fleets.as_seen_by(mover),
            record.turn,
        ))
    }

    /// Concedes the match to the opponent.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, not started
    /// or over, or `player` is not seated.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn resign(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        let color = self.in_play(&record, player)?;

        record.conclude_with_winner(color.opponent(), Utc::now());
        record.turn = None;

        let record = self.store.write(&record)?;
        info!(%color, "Player resigned");
        Ok(record)
    }

    /// Offers or accepts a draw.
    ///
    /// The first call records an offer; the opponent's call ends the match
    /// as a draw. Repeating an offer changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown, not started
    /// or over, or `player` is not seated.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn draw(&self, player: &PlayerId, id: &MatchId) -> Result<Match, MatchError> {
        let mut record = self.load(id)?;
        let color = self.in_play(&record, player)?;

        *record.draw_offer_mut(color) = true;
        if record.has_offered_draw(color.opponent()) {
            record.conclude_with_draw(Utc::now());
            record.turn = None;
            info!("Draw agreed");
        } else {
            info!(%color, "Draw offered");
        }

        Ok(self.store.write(&record)?)
    }

    /// Turn history of a concluded match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown or still in
    /// progress.
    #[instrument(skip(self), fields(match_id = %id))]
    pub fn replay(&self, id: &MatchId) -> Result<History, MatchError> {
        let record = self.load(id)?;
        if !record.is_concluded() {
            return Err(invalid("Match is not yet over"));
        }
        debug!(turns = record.history.len(), "Replaying match");
        Ok(record.history)
    }

    /// Reads a match, `None` if there is no such match.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the store fails.
    #[instrument(skip(self), fields(match_id = %id))]
    pub fn retrieve_match(&self, id: &MatchId) -> Result<Option<Match>, MatchError> {
        Ok(self.store.read(id)?)
    }

    /// Deletes a match at any stage. Host only.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Invalid`] if the match is unknown or `player`
    /// is not its host.
    #[instrument(skip(self), fields(player_id = %player, match_id = %id))]
    pub fn delete_match(&self, player: &PlayerId, id: &MatchId) -> Result<(), MatchError> {
        let record = self.load(id)?;
        if !record.is_host(player) {
            return Err(invalid("Match cannot be deleted by the given player"));
        }
        self.store.delete(id)?;
        info!("Match deleted");
        Ok(())
    }

    /// Matches that have not started, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the store fails.
    pub fn unstarted_matches(&self) -> Result<Vec<Match>, MatchError> {
        self.list(MatchFilter::Unstarted)
    }

    /// Matches in progress, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the store fails.
    pub fn active_matches(&self) -> Result<Vec<Match>, MatchError> {
        self.list(MatchFilter::Active)
    }

    /// Concluded matches, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the store fails.
    pub fn finished_matches(&self) -> Result<Vec<Match>, MatchError> {
        self.list(MatchFilter::Finished)
    }

    /// Matches selected by `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Store`] if the store fails.
    #[instrument(skip(self))]
    pub fn list(&self, filter: MatchFilter) -> Result<Vec<Match>, MatchError> {
        Ok(self.store.list(filter)?)
    }

    fn load(&self, id: &MatchId) -> Result<Match, MatchError> {
        self.store
            .read(id)?
            .ok_or_else(|| invalid("Match ID is invalid"))
    }

    fn seat_of(&self, record: &Match, player: &PlayerId) -> Result<Color, MatchError> {
        record
            .color_of(player)
            .ok_or_else(|| invalid("Player does not belong to match"))
    }

    /// Checks shared by resign and draw.
    fn in_play(&self, record: &Match, player: &PlayerId) -> Result<Color, MatchError> {
        if !record.started {
            return Err(invalid("Match has not yet started"));
        }
        if record.is_concluded() {
            return Err(invalid("Game over"));
        }
        self.seat_of(record, player)
    }

    fn draw_color(&self) -> Color {
        self.colors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_color()
    }
}

/// Applies a combat outcome. The attacker has not yet been moved in its
/// fleet.
fn resolve(fleets: &mut Fleets, attacker: Ship, defender: Ship, outcome: Outcome) {
    match outcome {
        Outcome::AttackerWins => {
            fleets.fleet_mut(defender.color).remove(defender.ship_class);
            fleets.fleet_mut(attacker.color).position(attacker);
        }
        Outcome::DefenderWins => {
            fleets.fleet_mut(attacker.color).remove(attacker.ship_class);
        }
        Outcome::Tie => {
            fleets.fleet_mut(defender.color).remove(defender.ship_class);
            fleets.fleet_mut(attacker.color).remove(attacker.ship_class);
        }
    }
}
