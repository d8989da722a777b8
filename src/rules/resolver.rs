//! Challenge resolution.
//!
//! When the current player challenges, every hand is counted against the
//! standing bid:
//!
//! 1. Count dice showing the bid face. Outside Maputa rounds, wildcards count
//!    too (unless the bid is itself on the wildcard face).
//! 2. If the count reaches the bid, the challenger loses a die. Otherwise the
//!    bidder (the player just before the challenger) does.
//! 3. A player with no dice left is eliminated. The game ends when one
//!    player remains.
//! 4. A surviving loser down to one die, with more than two players left,
//!    puts the next round under Maputa rules and opens it.

use serde::{Deserialize, Serialize};

use super::round::{RoundController, TurnStart};
use crate::core::{EliminationReason, GameError, GameEvent, GameResult, GameState, Phase, PlayerId};
use crate::dice::DieRemoval;

/// Summary of a settled challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub tallied: u32,
    pub claim_held: bool,
    pub loser: PlayerId,
    pub eliminated: bool,
    /// Set when this challenge ended the game.
    pub winner: Option<PlayerId>,
}

/// Settles challenges.
pub struct ChallengeResolver;

impl ChallengeResolver {
    /// Settle the standing bid, challenged by the current player.
    pub fn resolve(state: &mut GameState) -> GameResult<Outcome> {
        let bid = state
            .round
            .standing_bid
            .ok_or(GameError::InvariantViolation("resolving without a standing bid"))?;
        if state.rotation.len() < 2 {
            log::error!("challenge with {} active players", state.rotation.len());
            return Err(GameError::InvariantViolation("challenge needs two active players"));
        }

        state.phase = Phase::Resolving;

        let wildcard = state.config.wildcard_face;
        let wildcard_counted = !state.is_maputa && bid.face != wildcard;
        let mut tallied = state.hands.tally(bid.face);
        if wildcard_counted {
            tallied += state.hands.tally(wildcard);
        }
        let claim_held = tallied >= bid.count;

        let challenger_index = state.rotation.current_index();
        let bidder_index = state.rotation.previous_index();
        let loser_index = if claim_held { challenger_index } else { bidder_index };

        let (challenger, bidder, loser) = match (
            state.rotation.seat(challenger_index),
            state.rotation.seat(bidder_index),
            state.rotation.seat(loser_index),
        ) {
            (Some(c), Some(b), Some(l)) => (c.id, b.id, l.id),
            _ => return Err(GameError::InvariantViolation("turn pointer outside the rotation")),
        };

        let revealed = state.hands.reveal();
        let removal = state
            .hands
            .remove_one_die(loser)
            .map_err(|_| GameError::InvariantViolation("loser holds no dice"))?;
        let eliminated = removal == DieRemoval::Eliminated;

        log::debug!(
            "{} challenged {} on {}: {} counted, {} loses a die",
            challenger,
            bidder,
            bid,
            tallied,
            loser
        );

        state.emit(GameEvent::RoundResolved {
            bid,
            challenger,
            bidder,
            tallied,
            wildcard_counted,
            claim_held,
            loser,
            eliminated,
            revealed,
        });

        let winner = match removal {
            DieRemoval::Eliminated => Self::eliminate(state, loser, EliminationReason::OutOfDice)?,
            DieRemoval::Remaining(left) => {
                state.is_maputa = left == 1 && state.rotation.len() > 2;
                state.rotation.set_current(loser_index);
                let start = if state.is_maputa {
                    TurnStart::Keep
                } else {
                    TurnStart::Advance
                };
                RoundController::start_round(state, start)?;
                None
            }
        };

        Ok(Outcome {
            tallied,
            claim_held,
            loser,
            eliminated,
            winner,
        })
    }

    /// Take a player out of the game (their dice are already gone or forfeited).
    ///
    /// Ends the game if one player is left, otherwise starts a new round
    /// opened by whoever now holds the turn pointer. Returns the winner, if any.
    pub fn eliminate(
        state: &mut GameState,
        player: PlayerId,
        reason: EliminationReason,
    ) -> GameResult<Option<PlayerId>> {
        state
            .rotation
            .remove(player)
            .ok_or(GameError::UnknownPlayer(player))?;
        state.hands.remove_player(player);
        state.is_maputa = false;

        log::info!("{} eliminated ({:?}), {} left", player, reason, state.rotation.len());
        state.emit(GameEvent::PlayerEliminated { player, reason });

        match state.rotation.len() {
            0 => Err(GameError::InvariantViolation("every player was eliminated")),
            1 => {
                let winner = state.current_player()?;
                state.phase = Phase::GameOver;
                state.winner = Some(winner);

                log::info!("game over after {} rounds, {} wins", state.round_number, winner);
                state.emit(GameEvent::GameOver { winner });
                Ok(Some(winner))
            }
            _ => {
                RoundController::start_round(state, TurnStart::Keep)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameRng, Player};
    use crate::rules::Bid;

    fn started(n: u64, dice: usize, seed: u64) -> GameState {
        let players = (0..n).map(|i| Player::new(i, format!("p{}", i))).collect();
        let config = GameConfig::new().with_starting_dice(dice);
        let mut state = GameState::new(config, players, GameRng::new(seed)).unwrap();
        RoundController::start_round(&mut state, TurnStart::Keep).unwrap();
        state.drain_events();
        state
    }

    fn p(id: u64) -> PlayerId {
        PlayerId::new(id)
    }

    /// Put `bid` on the table as if `bidder` made it, with the turn on the next seat.
    fn stand(state: &mut GameState, bidder: usize, bid: Bid) {
        state.rotation.set_current(bidder);
        state.round.standing_bid = Some(bid);
        state.rotation.advance();
    }

    #[test]
    fn test_true_claim_costs_challenger() {
        let mut state = started(3, 3, 42);
        // The bidder holds this face (or a wildcard), so one is always there.
        let face = state.hands.peek(p(0)).unwrap()[0];
        let face = if face == 1 { 2 } else { face };
        stand(&mut state, 0, Bid::new(1, face));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();

        assert!(outcome.claim_held);
        assert_eq!(outcome.loser, p(1));
        assert!(!outcome.eliminated);
        assert_eq!(state.hands.hand_size(p(1)), Some(2));
        assert_eq!(state.hands.total_dice(), 8);
    }

    #[test]
    fn test_bluff_costs_bidder() {
        let mut state = started(3, 3, 42);
        stand(&mut state, 2, Bid::new(10, 4));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();

        assert!(!outcome.claim_held);
        // Seat 2 bid, seat 0 challenged across the wrap.
        assert_eq!(outcome.loser, p(2));
        assert_eq!(state.hands.hand_size(p(2)), Some(2));
    }

    #[test]
    fn test_tally_includes_wildcards() {
        let mut state = started(4, 5, 7);
        let expected = state.hands.tally(4) + state.hands.tally(1);
        stand(&mut state, 0, Bid::new(1, 4));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();
        assert_eq!(outcome.tallied, expected);

        match &state.drain_events()[0] {
            GameEvent::RoundResolved {
                wildcard_counted,
                tallied,
                revealed,
                ..
            } => {
                assert!(*wildcard_counted);
                assert_eq!(*tallied, expected);
                assert_eq!(revealed.len(), 4);
                assert_eq!(revealed.iter().map(|(_, h)| h.len()).sum::<usize>(), 20);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_wildcard_bid_counts_only_wildcards() {
        let mut state = started(3, 5, 9);
        let expected = state.hands.tally(1);
        stand(&mut state, 0, Bid::new(1, 1));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();
        assert_eq!(outcome.tallied, expected);
    }

    #[test]
    fn test_maputa_ignores_wildcards() {
        let mut state = started(3, 5, 9);
        state.is_maputa = true;
        let expected = state.hands.tally(3);
        stand(&mut state, 0, Bid::new(1, 3));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();
        assert_eq!(outcome.tallied, expected);
    }

    #[test]
    fn test_next_round_opened_after_loser() {
        let mut state = started(3, 3, 42);
        stand(&mut state, 0, Bid::new(10, 4));

        ChallengeResolver::resolve(&mut state).unwrap();

        // Seat 0 lost; seat 1 opens the next round.
        assert_eq!(state.round_number, 2);
        assert!(!state.is_maputa);
        assert_eq!(state.current_player().unwrap(), p(1));
        assert!(state.round.standing_bid.is_none());
    }

    #[test]
    fn test_maputa_entered_and_loser_opens() {
        let mut state = started(3, 2, 42);
        stand(&mut state, 1, Bid::new(10, 4));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();

        assert_eq!(outcome.loser, p(1));
        assert!(state.is_maputa);
        assert_eq!(state.current_player().unwrap(), p(1));
        let round_started = state
            .drain_events()
            .into_iter()
            .find(|e| matches!(e, GameEvent::RoundStarted { .. }))
            .unwrap();
        assert!(matches!(round_started, GameEvent::RoundStarted { maputa: true, .. }));
    }

    #[test]
    fn test_no_maputa_with_two_players() {
        let mut state = started(2, 2, 42);
        stand(&mut state, 0, Bid::new(10, 4));

        ChallengeResolver::resolve(&mut state).unwrap();

        assert_eq!(state.hands.hand_size(p(0)), Some(1));
        assert!(!state.is_maputa);
    }

    #[test]
    fn test_maputa_ends_on_next_loss() {
        let mut state = started(3, 3, 42);
        state.is_maputa = true;
        stand(&mut state, 0, Bid::new(10, 4));

        ChallengeResolver::resolve(&mut state).unwrap();

        // Loser still has two dice, so the next round is normal again.
        assert!(!state.is_maputa);
    }

    #[test]
    fn test_elimination_retargets_turn() {
        let mut state = started(4, 1, 42);
        stand(&mut state, 1, Bid::new(10, 4));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();

        assert!(outcome.eliminated);
        assert_eq!(outcome.loser, p(1));
        assert_eq!(state.player_count(), 3);
        assert!(!state.hands.contains(p(1)));
        // The challenger took the eliminated seat and opens.
        assert_eq!(state.current_player().unwrap(), p(2));

        let kinds: Vec<_> = state.drain_events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["round_resolved", "player_eliminated", "round_started"]);
    }

    #[test]
    fn test_elimination_across_wrap() {
        let mut state = started(3, 1, 42);
        stand(&mut state, 2, Bid::new(10, 4));

        ChallengeResolver::resolve(&mut state).unwrap();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.current_player().unwrap(), p(0));
    }

    #[test]
    fn test_elimination_clears_maputa() {
        let mut state = started(4, 1, 42);
        state.is_maputa = true;
        stand(&mut state, 0, Bid::new(10, 4));

        ChallengeResolver::resolve(&mut state).unwrap();
        assert!(!state.is_maputa);
    }

    #[test]
    fn test_last_elimination_ends_game() {
        let mut state = started(2, 1, 42);
        stand(&mut state, 0, Bid::new(10, 4));

        let outcome = ChallengeResolver::resolve(&mut state).unwrap();

        assert_eq!(outcome.winner, Some(p(1)));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.winner, Some(p(1)));

        let kinds: Vec<_> = state.drain_events().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, vec!["round_resolved", "player_eliminated", "game_over"]);
    }

    #[test]
    fn test_eliminate_unknown_player() {
        let mut state = started(3, 1, 42);
        let err = ChallengeResolver::eliminate(&mut state, p(8), EliminationReason::Forfeit).unwrap_err();
        assert_eq!(err, GameError::UnknownPlayer(p(8)));
        assert_eq!(state.player_count(), 3);
    }

    #[test]
    fn test_resolve_without_bid_is_fatal() {
        let mut state = started(2, 2, 42);
        let err = ChallengeResolver::resolve(&mut state).unwrap_err();
        assert!(err.is_fatal());
    }
}
