//! Rounds and turns.
//!
//! `RoundController` drives the per-round state machine:
//!
//! ```text
//! WaitingForPlayers -> RoundInProgress -> Resolving -> RoundInProgress
//!                                                   -> GameOver
//! ```
//!
//! Bids are validated in three steps: turn order, structure, then legality
//! (including the rule that a wildcard count may only be claimed once per
//! normal round). A rejected move never changes the state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::bid::Bid;
use super::legality::{check_bid, BidRejection};
use super::resolver::{ChallengeResolver, Outcome};
use crate::core::{GameError, GameEvent, GameResult, GameState, Phase, PlayerId};

/// Per-round memory, cleared when a round starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Bid currently on the table.
    pub standing_bid: Option<Bid>,

    /// Counts already claimed on the wildcard face (normal rounds only).
    pub used_wildcard_counts: FxHashSet<u32>,

    /// Face fixed by the opening bid of a Maputa round.
    pub maputa_face: Option<u8>,
}

impl RoundState {
    /// Forget everything about the previous round.
    pub fn reset(&mut self) {
        self.standing_bid = None;
        self.used_wildcard_counts.clear();
        self.maputa_face = None;
    }
}

/// Who opens a new round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The player under the rotation pointer.
    Keep,
    /// The player after them.
    Advance,
}

/// Round and turn state machine.
pub struct RoundController;

impl RoundController {
    /// Start a new round: clear round memory, reroll all hands, pick the opener.
    pub fn start_round(state: &mut GameState, start: TurnStart) -> GameResult<()> {
        if state.rotation.is_empty() {
            log::error!("tried to start a round with no players");
            return Err(GameError::InvariantViolation("no active players"));
        }

        state.round_number += 1;
        state.round.reset();
        state.hands.reroll_all();
        if start == TurnStart::Advance {
            state.rotation.advance();
        }
        state.phase = Phase::RoundInProgress;

        let opener = state.current_player()?;
        let hand_sizes: Vec<_> = state
            .rotation
            .ids()
            .map(|id| (id, state.hands.hand_size(id).unwrap_or(0)))
            .collect();
        let total_dice = state.hands.total_dice();

        log::info!(
            "round {} started: {} players, {} dice, maputa={}, {} opens",
            state.round_number,
            hand_sizes.len(),
            total_dice,
            state.is_maputa,
            opener
        );

        state.emit(GameEvent::RoundStarted {
            round: state.round_number,
            maputa: state.is_maputa,
            opener,
            hand_sizes,
            total_dice,
        });
        Ok(())
    }

    /// Raise the standing bid.
    ///
    /// On success the turn passes to the next player.
    pub fn submit_bid(state: &mut GameState, player: PlayerId, count: i64, face: i64) -> GameResult<Bid> {
        Self::ensure_can_move(state, player)?;

        let bid = Bid::parse(count, face, &state.config).map_err(|err| {
            log::debug!("malformed bid from {}: {}", player, err);
            GameError::from(err)
        })?;

        Self::check_legal(state, bid).map_err(|reason| {
            log::debug!("rejected bid {} from {}: {}", bid, player, reason);
            GameError::IllegalBid { bid, reason }
        })?;

        if state.is_maputa {
            if state.round.maputa_face.is_none() {
                state.round.maputa_face = Some(bid.face);
            }
        } else if bid.face == state.config.wildcard_face {
            state.round.used_wildcard_counts.insert(bid.count);
        }

        state.round.standing_bid = Some(bid);
        state.rotation.advance();
        let next = state.current_player()?;

        log::debug!("{} bids {}, {} to move", player, bid, next);
        state.emit(GameEvent::BidAccepted { player, bid, next });
        Ok(bid)
    }

    /// Challenge the standing bid and settle the round.
    pub fn submit_challenge(state: &mut GameState, player: PlayerId) -> GameResult<Outcome> {
        Self::ensure_can_move(state, player)?;

        if state.round.standing_bid.is_none() {
            log::debug!("{} challenged before any bid", player);
            return Err(GameError::NoStandingBid);
        }

        ChallengeResolver::resolve(state)
    }

    /// Game still running, a round is open, and it is `player`'s turn.
    fn ensure_can_move(state: &GameState, player: PlayerId) -> GameResult<()> {
        state.ensure_not_over()?;

        if state.phase != Phase::RoundInProgress {
            return Err(GameError::InvariantViolation("no round in progress"));
        }

        let current = state.current_player()?;
        if current != player {
            if !state.rotation.contains(player) {
                return Err(GameError::UnknownPlayer(player));
            }
            log::debug!("{} moved out of turn, waiting on {}", player, current);
            return Err(GameError::NotYourTurn { player, current });
        }
        Ok(())
    }

    fn check_legal(state: &GameState, bid: Bid) -> Result<(), BidRejection> {
        check_bid(bid, state.round.standing_bid, state.bid_mode())?;

        let repeats_wildcard = !state.is_maputa
            && bid.face == state.config.wildcard_face
            && state.round.used_wildcard_counts.contains(&bid.count);
        if repeats_wildcard {
            return Err(BidRejection::RepeatedWildcardCount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameRng, Player};

    fn started(n: u64) -> GameState {
        let players = (0..n).map(|i| Player::new(i, format!("p{}", i))).collect();
        let mut state = GameState::new(GameConfig::new(), players, GameRng::new(42)).unwrap();
        RoundController::start_round(&mut state, TurnStart::Keep).unwrap();
        state.drain_events();
        state
    }

    fn p(id: u64) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn test_start_round() {
        let players = (0..3).map(|i| Player::new(i, format!("p{}", i))).collect();
        let mut state = GameState::new(GameConfig::new(), players, GameRng::new(42)).unwrap();

        RoundController::start_round(&mut state, TurnStart::Keep).unwrap();

        assert_eq!(state.round_number, 1);
        assert_eq!(state.phase, Phase::RoundInProgress);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::RoundStarted {
                round: 1,
                maputa: false,
                opener: p(0),
                hand_sizes: vec![(p(0), 3), (p(1), 3), (p(2), 3)],
                total_dice: 9,
            }]
        );
    }

    #[test]
    fn test_start_round_advance_and_reset() {
        let mut state = started(3);
        RoundController::submit_bid(&mut state, p(0), 2, 3).unwrap();
        RoundController::submit_bid(&mut state, p(1), 2, 1).unwrap();

        RoundController::start_round(&mut state, TurnStart::Advance).unwrap();

        assert_eq!(state.round_number, 2);
        assert_eq!(state.current_player().unwrap(), p(0));
        assert_eq!(state.round, RoundState::default());
    }

    #[test]
    fn test_bid_advances_turn() {
        let mut state = started(3);

        let bid = RoundController::submit_bid(&mut state, p(0), 2, 3).unwrap();

        assert_eq!(bid, Bid::new(2, 3));
        assert_eq!(state.round.standing_bid, Some(bid));
        assert_eq!(state.current_player().unwrap(), p(1));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::BidAccepted {
                player: p(0),
                bid,
                next: p(1)
            }]
        );
    }

    #[test]
    fn test_bid_out_of_turn() {
        let mut state = started(3);

        let err = RoundController::submit_bid(&mut state, p(2), 2, 3).unwrap_err();

        assert_eq!(err, GameError::NotYourTurn { player: p(2), current: p(0) });
        assert!(state.round.standing_bid.is_none());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_bid_from_stranger() {
        let mut state = started(2);
        let err = RoundController::submit_bid(&mut state, p(9), 2, 3).unwrap_err();
        assert_eq!(err, GameError::UnknownPlayer(p(9)));
    }

    #[test]
    fn test_turn_checked_before_structure() {
        let mut state = started(2);
        let err = RoundController::submit_bid(&mut state, p(1), 0, 9).unwrap_err();
        assert!(matches!(err, GameError::NotYourTurn { .. }));
    }

    #[test]
    fn test_malformed_bid() {
        let mut state = started(2);

        let err = RoundController::submit_bid(&mut state, p(0), 2, 7).unwrap_err();
        assert!(matches!(err, GameError::MalformedBid(_)));

        let err = RoundController::submit_bid(&mut state, p(0), 0, 3).unwrap_err();
        assert!(matches!(err, GameError::MalformedBid(_)));

        assert_eq!(state.current_player().unwrap(), p(0));
    }

    #[test]
    fn test_wildcard_opening_rejected() {
        let mut state = started(2);
        let err = RoundController::submit_bid(&mut state, p(0), 2, 1).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalBid {
                bid: Bid::new(2, 1),
                reason: BidRejection::WildcardOpening
            }
        );
    }

    #[test]
    fn test_wildcard_count_cannot_repeat() {
        let mut state = started(4);
        RoundController::submit_bid(&mut state, p(0), 2, 3).unwrap();
        RoundController::submit_bid(&mut state, p(1), 2, 1).unwrap();
        assert!(state.round.used_wildcard_counts.contains(&2));

        RoundController::submit_bid(&mut state, p(2), 4, 5).unwrap();

        // Half of 4 is legal on its own, but 2 wildcards were already claimed.
        let err = RoundController::submit_bid(&mut state, p(3), 2, 1).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalBid {
                bid: Bid::new(2, 1),
                reason: BidRejection::RepeatedWildcardCount
            }
        );

        RoundController::submit_bid(&mut state, p(3), 3, 1).unwrap();
    }

    #[test]
    fn test_maputa_first_bid_pins_face() {
        let mut state = started(3);
        state.is_maputa = true;

        // Wildcard face opens fine in Maputa rounds.
        RoundController::submit_bid(&mut state, p(0), 1, 1).unwrap();
        assert_eq!(state.round.maputa_face, Some(1));
        assert!(state.round.used_wildcard_counts.is_empty());

        let err = RoundController::submit_bid(&mut state, p(1), 2, 4).unwrap_err();
        assert!(matches!(
            err,
            GameError::IllegalBid {
                reason: BidRejection::MaputaFaceMismatch { expected: 1 },
                ..
            }
        ));

        RoundController::submit_bid(&mut state, p(1), 2, 1).unwrap();
        assert_eq!(state.round.maputa_face, Some(1));
    }

    #[test]
    fn test_challenge_needs_standing_bid() {
        let mut state = started(2);
        let err = RoundController::submit_challenge(&mut state, p(0)).unwrap_err();
        assert_eq!(err, GameError::NoStandingBid);
        assert_eq!(state.phase, Phase::RoundInProgress);
    }

    #[test]
    fn test_move_before_first_round() {
        let players = (0..2).map(|i| Player::new(i, format!("p{}", i))).collect();
        let mut state = GameState::new(GameConfig::new(), players, GameRng::new(1)).unwrap();

        let err = RoundController::submit_bid(&mut state, p(0), 2, 3).unwrap_err();
        assert!(err.is_fatal());
    }
}
