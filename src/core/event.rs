//! Game events.
//!
//! Events are plain records of what the engine did. The transport layer turns
//! them into messages; nothing here is formatted or localized.
//!
//! Only [`GameEvent::RoundResolved`] carries dice faces, because a challenge
//! reveals every hand. Round starts carry hand sizes only.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::dice::Hand;
use crate::rules::Bid;

/// Why a player left the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EliminationReason {
    /// Lost their last die in a challenge.
    OutOfDice,
    /// Removed on the transport layer's request (timeout, left the chat).
    Forfeit,
}

/// Something the transport layer may want to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted {
        round: u32,
        maputa: bool,
        /// Who bids first.
        opener: PlayerId,
        /// Dice per player in turn order.
        hand_sizes: Vec<(PlayerId, usize)>,
        total_dice: usize,
    },

    BidAccepted {
        player: PlayerId,
        bid: Bid,
        next: PlayerId,
    },

    RoundResolved {
        bid: Bid,
        challenger: PlayerId,
        bidder: PlayerId,
        /// Dice counted toward the bid.
        tallied: u32,
        /// Whether wildcards were included in `tallied`.
        wildcard_counted: bool,
        claim_held: bool,
        loser: PlayerId,
        eliminated: bool,
        /// Every hand as it stood when the challenge was made.
        revealed: Vec<(PlayerId, Hand)>,
    },

    PlayerEliminated {
        player: PlayerId,
        reason: EliminationReason,
    },

    GameOver {
        winner: PlayerId,
    },
}

impl GameEvent {
    /// Short name, handy for logs and assertions.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::BidAccepted { .. } => "bid_accepted",
            GameEvent::RoundResolved { .. } => "round_resolved",
            GameEvent::PlayerEliminated { .. } => "player_eliminated",
            GameEvent::GameOver { .. } => "game_over",
        }
    }
}
