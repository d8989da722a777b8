//! # maputa
//!
//! Rules engine for Maputa, a bluffing dice game in the Liar's Dice family.
//!
//! Every player hides a hand of dice. On their turn a player either raises
//! the bid ("at least N dice show face F") or challenges it. A challenge
//! reveals all hands; whoever was wrong loses a die, and a player with no
//! dice left is out. The last player standing wins.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: No text, no transport. Moves go in, typed errors and
//!    plain event records come out.
//!
//! 2. **Deterministic**: All randomness flows from one seeded ChaCha stream,
//!    so any game can be replayed or checkpointed.
//!
//! 3. **No global state**: Each session owns its roster and dice. Callers
//!    decide where sessions live.
//!
//! ## Modules
//!
//! - `core`: Players, rotation, state, events, errors, RNG, configuration
//! - `dice`: Hands and the hand store
//! - `rules`: Bids, legality, round state machine, challenge resolution
//! - `session`: Lobby, game session, registry, snapshots
//!
//! ## Example
//!
//! ```
//! use maputa::{GameConfig, GameSession, Player, PlayerId};
//!
//! let players = vec![Player::new(1, "alice"), Player::new(2, "bob")];
//! let mut game = GameSession::new(players, GameConfig::new(), 42).unwrap();
//!
//! game.submit_bid(PlayerId::new(1), 2, 3).unwrap();
//! let outcome = game.submit_challenge(PlayerId::new(2)).unwrap();
//!
//! assert_eq!(game.total_dice(), 5);
//! assert!(outcome.loser == PlayerId::new(1) || outcome.loser == PlayerId::new(2));
//! ```

pub mod core;
pub mod dice;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, EliminationReason, GameConfig, GameError, GameEvent, GameResult, GameRng,
    GameRngState, GameState, Phase, Player, PlayerId, Rotation, MIN_PLAYERS,
};

pub use crate::dice::{DieRemoval, Hand, HandStore};

pub use crate::rules::{
    check_bid, is_legal, Bid, BidMode, BidRejection, ChallengeResolver, MalformedBid, Move, Outcome,
    RoundController, RoundState, TurnStart,
};

pub use crate::session::{
    GameSession, Lobby, MoveResult, RegistryError, SessionRegistry, SnapshotError, Table, TableHandle,
};
