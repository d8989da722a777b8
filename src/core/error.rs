//! Engine errors.
//!
//! Every variant carries structured data only. Wording shown to players is
//! the transport layer's business; the `Display` strings here are for logs.
//!
//! All variants except [`GameError::InvariantViolation`] leave the game
//! untouched and can simply be reported back to the sender.

use thiserror::Error;

use super::config::ConfigError;
use super::player::PlayerId;
use crate::rules::{Bid, BidRejection, MalformedBid};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Someone other than the current player tried to move.
    #[error("{player} moved out of turn, waiting on {current}")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("malformed bid: {0}")]
    MalformedBid(#[from] MalformedBid),

    #[error("illegal bid {bid}: {reason}")]
    IllegalBid { bid: Bid, reason: BidRejection },

    /// A challenge needs a bid to challenge.
    #[error("no bid has been made this round")]
    NoStandingBid,

    /// The game has a winner; only reads are allowed.
    #[error("the game is over, {winner} won")]
    GameOver { winner: PlayerId },

    #[error("{0} is not in this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already joined")]
    AlreadyJoined(PlayerId),

    #[error("need at least {need} players, have {have}")]
    NotEnoughPlayers { have: usize, need: usize },

    #[error("the lobby is full ({max} players)")]
    LobbyFull { max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Internal state is inconsistent. The session must be discarded.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl GameError {
    /// True if the session can no longer be trusted.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::InvariantViolation(_))
    }
}

/// Result type for engine operations.
pub type GameResult<T> = Result<T, GameError>;
