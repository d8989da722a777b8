//! The public face of one game.
//!
//! `GameSession` wraps a `GameState` and exposes exactly the operations a
//! transport layer needs: moves, forfeits, private hand peeks, public reads,
//! and the event queue. It holds no global state; the caller decides where
//! sessions live (see `SessionRegistry`).

use serde::{Deserialize, Serialize};

use crate::core::{
    EliminationReason, GameConfig, GameError, GameEvent, GameResult, GameRng, GameState, Phase, Player,
    PlayerId,
};
use crate::rules::{Bid, ChallengeResolver, Move, Outcome, RoundController, TurnStart};

/// What an applied [`Move`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Bid(Bid),
    Challenge(Outcome),
}

/// One running game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    pub(crate) state: GameState,
}

impl GameSession {
    /// Start a game with players seated in the given order.
    ///
    /// Deals starting hands and opens round 1 with the first seat to bid.
    pub fn new(players: Vec<Player>, config: GameConfig, seed: u64) -> GameResult<Self> {
        let rng = GameRng::new(seed);
        Self::start(players, config, &rng)
    }

    /// Start a game after shuffling the seating once.
    pub fn shuffled(mut players: Vec<Player>, config: GameConfig, seed: u64) -> GameResult<Self> {
        let rng = GameRng::new(seed);
        rng.for_context("seating").shuffle(&mut players);
        Self::start(players, config, &rng)
    }

    fn start(players: Vec<Player>, config: GameConfig, rng: &GameRng) -> GameResult<Self> {
        let mut state = GameState::new(config, players, rng.for_context("dice"))?;
        RoundController::start_round(&mut state, TurnStart::Keep)?;
        Ok(Self { state })
    }

    // === Moves ===

    /// Raise the standing bid. `count` and `face` are checked here.
    pub fn submit_bid(&mut self, player: PlayerId, count: i64, face: i64) -> GameResult<Bid> {
        RoundController::submit_bid(&mut self.state, player, count, face)
    }

    /// Challenge the standing bid.
    pub fn submit_challenge(&mut self, player: PlayerId) -> GameResult<Outcome> {
        RoundController::submit_challenge(&mut self.state, player)
    }

    /// Apply a move from the transport layer.
    pub fn apply(&mut self, player: PlayerId, mv: Move) -> GameResult<MoveResult> {
        match mv {
            Move::Bid { count, face } => self.submit_bid(player, count, face).map(MoveResult::Bid),
            Move::Challenge => self.submit_challenge(player).map(MoveResult::Challenge),
        }
    }

    /// Remove a player who can no longer play (timed out, left).
    ///
    /// Allowed at any time, not only on the player's turn. The current round
    /// is abandoned and a fresh one starts. Returns the winner if this ended
    /// the game.
    pub fn forfeit(&mut self, player: PlayerId) -> GameResult<Option<PlayerId>> {
        self.state.ensure_not_over()?;
        ChallengeResolver::eliminate(&mut self.state, player, EliminationReason::Forfeit)
    }

    // === Private reads ===

    /// A player's own dice. Never show this to anyone else.
    pub fn peek_hand(&self, player: PlayerId) -> GameResult<&[u8]> {
        self.state.ensure_not_over()?;
        self.state
            .hands
            .peek(player)
            .ok_or(GameError::UnknownPlayer(player))
    }

    // === Events ===

    /// Take every event produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    // === Public reads ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::GameOver
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner
    }

    /// Whose turn it is, while the game runs.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.is_over() {
            return None;
        }
        self.state.rotation.current().map(|p| p.id)
    }

    /// Active players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.state.rotation.iter()
    }

    /// Look up an active player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.rotation.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.state.player_count()
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.state.round_number
    }

    #[must_use]
    pub fn is_maputa(&self) -> bool {
        self.state.is_maputa
    }

    #[must_use]
    pub fn standing_bid(&self) -> Option<Bid> {
        self.state.round.standing_bid
    }

    /// Dice per active player, in deal order.
    #[must_use]
    pub fn hand_sizes(&self) -> Vec<(PlayerId, usize)> {
        self.state.hands.hand_sizes()
    }

    #[must_use]
    pub fn total_dice(&self) -> usize {
        self.state.hands.total_dice()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    /// Full state, including hidden hands. For tests and tooling.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}
