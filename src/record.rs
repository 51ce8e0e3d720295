//! The persisted match record and its lifecycle phase.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use cots_rules::{Color, Fleets};

use crate::history::History;
use crate::ids::{MatchId, PlayerId};

/// Lifecycle phase, derived from the record's flags.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Only the host is seated.
    #[display("hosted")]
    Hosted,
    /// Both seats filled, fleets being positioned.
    #[display("fleet setup")]
    FleetSetup,
    /// Both sides ready, waiting for the host to start.
    #[display("ready")]
    Ready,
    /// Turns are being played.
    #[display("active")]
    Active,
    /// Won, resigned or drawn.
    #[display("concluded")]
    Concluded,
}

/// One match between two players.
///
/// Mutated only by [`crate::MatchService`]; every accepted operation is
/// written back through a [`crate::MatchStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Match {
    pub(crate) uuid: MatchId,
    pub(crate) host: PlayerId,
    pub(crate) white_player: Option<PlayerId>,
    pub(crate) black_player: Option<PlayerId>,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) loser: Option<PlayerId>,
    pub(crate) draw: bool,
    pub(crate) white_player_offered_draw: bool,
    pub(crate) black_player_offered_draw: bool,
    pub(crate) turn: Option<Color>,
    pub(crate) started: bool,
    pub(crate) white_player_ready: bool,
    pub(crate) black_player_ready: bool,
    pub(crate) creation_date: DateTime<Utc>,
    pub(crate) start_date: Option<DateTime<Utc>>,
    pub(crate) end_date: Option<DateTime<Utc>>,
    pub(crate) fleets: Fleets,
    pub(crate) history: History,
    /// Optimistic concurrency token, bumped by the store on every write.
    pub(crate) version: u64,
}

impl Match {
    /// Creates an unstarted match with `host` seated as `host_color`.
    #[instrument(skip(host, created_at), fields(host = %host))]
    pub fn hosted(uuid: MatchId, host: PlayerId, host_color: Color, created_at: DateTime<Utc>) -> Self {
        let (white_player, black_player) = match host_color {
            Color::White => (Some(host.clone()), None),
            Color::Black => (None, Some(host.clone())),
        };
        Self {
            uuid,
            host,
            white_player,
            black_player,
            winner: None,
            loser: None,
            draw: false,
            white_player_offered_draw: false,
            black_player_offered_draw: false,
            turn: None,
            started: false,
            white_player_ready: false,
            black_player_ready: false,
            creation_date: created_at,
            start_date: None,
            end_date: None,
            fleets: Fleets::unplaced(),
            history: History::default(),
            version: 0,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.is_concluded() {
            Phase::Concluded
        } else if self.started {
            Phase::Active
        } else if !self.has_both_players() {
            Phase::Hosted
        } else if self.white_player_ready && self.black_player_ready {
            Phase::Ready
        } else {
            Phase::FleetSetup
        }
    }

    /// True once won, resigned or drawn.
    pub fn is_concluded(&self) -> bool {
        self.winner.is_some() || self.draw
    }

    /// True when both seats are filled.
    pub fn has_both_players(&self) -> bool {
        self.white_player.is_some() && self.black_player.is_some()
    }

    /// Seat of `player`, if seated.
    pub fn color_of(&self, player: &PlayerId) -> Option<Color> {
        if self.white_player.as_ref() == Some(player) {
            Some(Color::White)
        } else if self.black_player.as_ref() == Some(player) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Player seated as `color`.
    pub fn player(&self, color: Color) -> Option<&PlayerId> {
        match color {
            Color::White => self.white_player.as_ref(),
            Color::Black => self.black_player.as_ref(),
        }
    }

    /// True once `color` has locked in its fleet.
    pub fn is_ready(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_player_ready,
            Color::Black => self.black_player_ready,
        }
    }

    /// True if `color` has an open draw offer.
    pub fn has_offered_draw(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_player_offered_draw,
            Color::Black => self.black_player_offered_draw,
        }
    }

    /// True if `player` created this match.
    pub fn is_host(&self, player: &PlayerId) -> bool {
        &self.host == player
    }

    pub(crate) fn seat_mut(&mut self, color: Color) -> &mut Option<PlayerId> {
        match color {
            Color::White => &mut self.white_player,
            Color::Black => &mut self.black_player,
        }
    }

    pub(crate) fn ready_mut(&mut self, color: Color) -> &mut bool {
        match color {
            Color::White => &mut self.white_player_ready,
            Color::Black => &mut self.black_player_ready,
        }
    }

    pub(crate) fn draw_offer_mut(&mut self, color: Color) -> &mut bool {
        match color {
            Color::White => &mut self.white_player_offered_draw,
            Color::Black => &mut self.black_player_offered_draw,
        }
    }

    /// Stamps a decided result. Winner, loser and end date move together.
    pub(crate) fn conclude_with_winner(&mut self, winner: Color, at: DateTime<Utc>) {
        self.winner = self.player(winner).cloned();
        self.loser = self.player(winner.opponent()).cloned();
        self.end_date = Some(at);
    }

    pub(crate) fn conclude_with_draw(&mut self, at: DateTime<Utc>) {
        self.draw = true;
        self.end_date = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str) -> PlayerId {
        PlayerId::new(name).unwrap()
    }

    #[test]
    fn test_hosted_phase_and_seat() {
        let m = Match::hosted(MatchId::new(), player("alice"), Color::Black, Utc::now());
        assert_eq!(m.phase(), Phase::Hosted);
        assert_eq!(m.color_of(&player("alice")), Some(Color::Black));
        assert!(m.white_player().is_none());
        assert!(m.is_host(&player("alice")));
    }

    #[test]
    fn test_phase_progression() {
        let mut m = Match::hosted(MatchId::new(), player("alice"), Color::White, Utc::now());
        m.black_player = Some(player("bob"));
        assert_eq!(m.phase(), Phase::FleetSetup);
        m.white_player_ready = true;
        m.black_player_ready = true;
        assert_eq!(m.phase(), Phase::Ready);
        m.started = true;
        assert_eq!(m.phase(), Phase::Active);
        m.conclude_with_winner(Color::Black, Utc::now());
        assert_eq!(m.phase(), Phase::Concluded);
        assert_eq!(m.winner().as_ref(), Some(&player("bob")));
        assert_eq!(m.loser().as_ref(), Some(&player("alice")));
    }
}
