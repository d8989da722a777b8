//! Bid legality.
//!
//! Whether a bid may follow the standing bid depends only on the standing
//! bid and the round mode. The per-round wildcard memory is enforced by the
//! round controller on top of this.
//!
//! ## Normal rounds
//!
//! The wildcard counts toward every face, so it is worth roughly double:
//! - Opening with the wildcard is not allowed.
//! - Wildcard after wildcard: the count must go up.
//! - Switching to the wildcard: at least half the previous count.
//! - Switching away from the wildcard: at least double the previous count.
//! - Otherwise: a higher count, or the same count on a higher face.
//!
//! ## Maputa rounds
//!
//! No wildcard. The opening bid is free and pins the face; every later bid
//! must use that face with a higher count.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bid::Bid;

/// The rules a round is played under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidMode {
    Normal { wildcard: u8 },
    Maputa { face: Option<u8> },
}

impl BidMode {
    /// Build the mode from the round flags.
    #[must_use]
    pub fn new(is_maputa: bool, maputa_face: Option<u8>, wildcard_face: u8) -> Self {
        if is_maputa {
            BidMode::Maputa { face: maputa_face }
        } else {
            BidMode::Normal {
                wildcard: wildcard_face,
            }
        }
    }
}

/// Why a well-formed bid was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BidRejection {
    #[error("the opening bid cannot use the wildcard")]
    WildcardOpening,

    #[error("the bid does not raise the standing bid")]
    NotHigher,

    #[error("switching to the wildcard needs at least half the standing count")]
    WildcardTooLow,

    #[error("switching away from the wildcard needs at least double its count")]
    LeavingWildcardTooLow,

    #[error("this wildcard count was already claimed this round")]
    RepeatedWildcardCount,

    #[error("every bid this round must be on face {expected}")]
    MaputaFaceMismatch { expected: u8 },
}

/// Check whether `candidate` may follow `previous`.
pub fn check_bid(candidate: Bid, previous: Option<Bid>, mode: BidMode) -> Result<(), BidRejection> {
    match mode {
        BidMode::Normal { wildcard } => check_normal(candidate, previous, wildcard),
        BidMode::Maputa { face } => check_maputa(candidate, previous, face),
    }
}

/// Boolean form of [`check_bid`] taking the round flags directly.
#[must_use]
pub fn is_legal(
    candidate: Bid,
    previous: Option<Bid>,
    is_maputa: bool,
    maputa_face: Option<u8>,
    wildcard_face: u8,
) -> bool {
    let mode = BidMode::new(is_maputa, maputa_face, wildcard_face);
    check_bid(candidate, previous, mode).is_ok()
}

fn check_normal(candidate: Bid, previous: Option<Bid>, wildcard: u8) -> Result<(), BidRejection> {
    let Some(previous) = previous else {
        return if candidate.face == wildcard {
            Err(BidRejection::WildcardOpening)
        } else {
            Ok(())
        };
    };

    // u64 so doubling never overflows.
    let count = u64::from(candidate.count);
    let prev_count = u64::from(previous.count);

    match (candidate.face == wildcard, previous.face == wildcard) {
        (true, true) if count > prev_count => Ok(()),
        (true, true) => Err(BidRejection::NotHigher),
        (true, false) if count * 2 >= prev_count => Ok(()),
        (true, false) => Err(BidRejection::WildcardTooLow),
        (false, true) if prev_count * 2 <= count => Ok(()),
        (false, true) => Err(BidRejection::LeavingWildcardTooLow),
        (false, false) if count == prev_count && candidate.face > previous.face => Ok(()),
        (false, false) if count > prev_count => Ok(()),
        (false, false) => Err(BidRejection::NotHigher),
    }
}

fn check_maputa(
    candidate: Bid,
    previous: Option<Bid>,
    pinned: Option<u8>,
) -> Result<(), BidRejection> {
    let Some(previous) = previous else {
        return Ok(());
    };

    let expected = pinned.unwrap_or(previous.face);
    if pinned != Some(previous.face) || candidate.face != previous.face {
        return Err(BidRejection::MaputaFaceMismatch { expected });
    }

    if candidate.count > previous.count {
        Ok(())
    } else {
        Err(BidRejection::NotHigher)
    }
}
