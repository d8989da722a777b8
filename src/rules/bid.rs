//! Bids and moves.
//!
//! A `Bid` is the claim "at least `count` dice show `face`". Once a bid is
//! built it has already passed structural validation, so the legality rules
//! only ever see well-formed bids. Raw player input arrives as a [`Move`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameConfig;

/// Why a move could not even be read as a bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MalformedBid {
    #[error("a bid takes exactly a count and a face, got {len} values")]
    WrongArity { len: usize },

    #[error("count {0} is not a positive number")]
    NonPositiveCount(i64),

    #[error("count {0} is too large")]
    CountTooLarge(i64),

    #[error("face {face} is outside {min}..={max}")]
    FaceOutOfRange { face: i64, min: u8, max: u8 },
}

/// A claim about the hidden dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub count: u32,
    pub face: u8,
}

impl Bid {
    /// Build a bid without range checks. Meant for tests and replays.
    #[must_use]
    pub const fn new(count: u32, face: u8) -> Self {
        Self { count, face }
    }

    /// Build a bid from raw input, checking it against the configured faces.
    pub fn parse(count: i64, face: i64, config: &GameConfig) -> Result<Self, MalformedBid> {
        if count <= 0 {
            return Err(MalformedBid::NonPositiveCount(count));
        }
        let count = u32::try_from(count).map_err(|_| MalformedBid::CountTooLarge(count))?;

        if !config.face_in_range(face) {
            return Err(MalformedBid::FaceOutOfRange {
                face,
                min: config.min_face,
                max: config.max_face,
            });
        }
        // In range of two u8 bounds, so this cannot truncate.
        let face = face as u8;

        Ok(Self { count, face })
    }
}

impl std::fmt::Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.count, self.face)
    }
}

/// A player's move as received from the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Raise the standing bid. Values are unchecked.
    Bid { count: i64, face: i64 },
    /// Challenge the standing bid ("open up").
    Challenge,
}

impl Move {
    /// Read a bid from a list of integers. Exactly two are expected.
    pub fn from_values(values: &[i64]) -> Result<Self, MalformedBid> {
        match *values {
            [count, face] => Ok(Move::Bid { count, face }),
            _ => Err(MalformedBid::WrongArity { len: values.len() }),
        }
    }
}
