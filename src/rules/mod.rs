//! Game rules.
//!
//! - `bid`: bids and raw moves, with structural validation
//! - `legality`: whether a bid may follow the standing bid
//! - `round`: round/turn state machine
//! - `resolver`: settling a challenge, elimination, Maputa mode
//!
//! All rule functions take `&mut GameState`. A rejected move returns an error
//! without touching the state; only `InvariantViolation` errors can leave a
//! game half-updated.

pub mod bid;
pub mod legality;
pub mod round;
pub mod resolver;

pub use bid::{Bid, MalformedBid, Move};
pub use legality::{check_bid, is_legal, BidMode, BidRejection};
pub use round::{RoundController, RoundState, TurnStart};
pub use resolver::{ChallengeResolver, Outcome};
