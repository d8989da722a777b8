//! Game configuration.
//!
//! Callers configure a game at session creation:
//! - How many dice each player starts with (bounded by `max_starting_dice`)
//! - The face range of a die
//! - Which face is the wildcard
//! - How many players a lobby accepts
//!
//! `GameConfig` is serde-friendly so the transport layer can load it from
//! whatever config format it already uses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest players a game can start with.
pub const MIN_PLAYERS: usize = 2;

/// Configuration validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("face range {min}..={max} is empty or starts at zero")]
    InvalidFaceRange { min: u8, max: u8 },

    #[error("wildcard face {wildcard} is outside {min}..={max}")]
    WildcardOutOfRange { wildcard: u8, min: u8, max: u8 },

    #[error("starting dice {requested} must be between 1 and {max}")]
    StartingDiceOutOfRange { requested: usize, max: usize },

    #[error("max players {0} is below the minimum of 2")]
    TooFewSeats(usize),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dice dealt to every player at game start.
    pub starting_dice: usize,

    /// Upper bound for `starting_dice`.
    pub max_starting_dice: usize,

    /// Lowest face value.
    pub min_face: u8,

    /// Highest face value.
    pub max_face: u8,

    /// Face that counts toward every other face outside Maputa rounds.
    pub wildcard_face: u8,

    /// Lobby capacity.
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_dice: 3,
            max_starting_dice: 10,
            min_face: 1,
            max_face: 6,
            wildcard_face: 1,
            max_players: 10,
        }
    }
}

impl GameConfig {
    /// Create the default configuration (3 six-sided dice, ones are wild).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting dice count.
    #[must_use]
    pub fn with_starting_dice(mut self, count: usize) -> Self {
        self.starting_dice = count;
        self
    }

    /// Set the upper bound for the starting dice count.
    #[must_use]
    pub fn with_max_starting_dice(mut self, max: usize) -> Self {
        self.max_starting_dice = max;
        self
    }

    /// Set the face range.
    #[must_use]
    pub fn with_faces(mut self, min: u8, max: u8) -> Self {
        self.min_face = min;
        self.max_face = max;
        self
    }

    /// Set the wildcard face.
    #[must_use]
    pub fn with_wildcard(mut self, face: u8) -> Self {
        self.wildcard_face = face;
        self
    }

    /// Set lobby capacity.
    #[must_use]
    pub fn with_max_players(mut self, max: usize) -> Self {
        self.max_players = max;
        self
    }

    /// Is `face` a valid die face?
    #[must_use]
    pub fn face_in_range(&self, face: i64) -> bool {
        (i64::from(self.min_face)..=i64::from(self.max_face)).contains(&face)
    }

    /// Check that the configuration describes a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_face == 0 || self.min_face > self.max_face {
            return Err(ConfigError::InvalidFaceRange {
                min: self.min_face,
                max: self.max_face,
            });
        }

        if !(self.min_face..=self.max_face).contains(&self.wildcard_face) {
            return Err(ConfigError::WildcardOutOfRange {
                wildcard: self.wildcard_face,
                min: self.min_face,
                max: self.max_face,
            });
        }

        self.check_starting_dice(self.starting_dice)?;

        if self.max_players < MIN_PLAYERS {
            return Err(ConfigError::TooFewSeats(self.max_players));
        }

        Ok(())
    }

    /// Check a starting dice count against `max_starting_dice`.
    pub fn check_starting_dice(&self, count: usize) -> Result<(), ConfigError> {
        if count == 0 || count > self.max_starting_dice {
            return Err(ConfigError::StartingDiceOutOfRange {
                requested: count,
                max: self.max_starting_dice,
            });
        }
        Ok(())
    }
}
