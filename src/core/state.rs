//! Game state.
//!
//! ## GameState
//!
//! Everything one game needs:
//! - Configuration and seating (`Rotation`)
//! - Hidden hands (`HandStore`, which also owns the RNG)
//! - The current round (`RoundState`), round number and Maputa flag
//! - Phase and winner
//! - Events not yet drained by the caller
//!
//! Rules live in `rules`; this module only holds data and small accessors.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::{GameConfig, MIN_PLAYERS};
use super::error::{GameError, GameResult};
use super::event::GameEvent;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use super::rotation::Rotation;
use crate::dice::HandStore;
use crate::rules::{BidMode, RoundState};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Players dealt, first round not started yet.
    WaitingForPlayers,
    /// Bids are being taken.
    RoundInProgress,
    /// A challenge is being settled.
    Resolving,
    /// One player is left. Terminal.
    GameOver,
}

/// Complete state of one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    pub rotation: Rotation,
    pub hands: HandStore,
    pub round: RoundState,

    /// Rounds started so far (starts at 0, first round is 1).
    pub round_number: u32,

    /// Current round is played under Maputa rules.
    pub is_maputa: bool,

    pub phase: Phase,
    pub winner: Option<PlayerId>,

    /// Events waiting for the caller.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Seat `players` in the given order and deal their starting hands.
    ///
    /// The first round is not started; see `RoundController::start_round`.
    pub fn new(config: GameConfig, players: Vec<Player>, rng: GameRng) -> GameResult<Self> {
        config.validate()?;

        if players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                have: players.len(),
                need: MIN_PLAYERS,
            });
        }

        let mut seen = FxHashSet::default();
        for player in &players {
            if !seen.insert(player.id) {
                return Err(GameError::AlreadyJoined(player.id));
            }
        }

        let mut hands = HandStore::new(config.min_face, config.max_face, rng);
        hands.deal(players.iter().map(|p| p.id), config.starting_dice)?;

        Ok(Self {
            config,
            rotation: Rotation::new(players),
            hands,
            round: RoundState::default(),
            round_number: 0,
            is_maputa: false,
            phase: Phase::WaitingForPlayers,
            winner: None,
            events: Vec::new(),
        })
    }

    /// Queue an event for the caller.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> GameResult<PlayerId> {
        self.rotation
            .current()
            .map(|p| p.id)
            .ok_or(GameError::InvariantViolation("no active players"))
    }

    /// Fail with the terminal-state error once the game is over.
    pub fn ensure_not_over(&self) -> GameResult<()> {
        match (self.phase, self.winner) {
            (Phase::GameOver, Some(winner)) => Err(GameError::GameOver { winner }),
            (Phase::GameOver, None) => Err(GameError::InvariantViolation("game over without a winner")),
            _ => Ok(()),
        }
    }

    /// Bid rules for the current round.
    #[must_use]
    pub fn bid_mode(&self) -> BidMode {
        BidMode::new(self.is_maputa, self.round.maputa_face, self.config.wildcard_face)
    }

    /// Number of active players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.rotation.len()
    }
}
