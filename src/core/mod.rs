//! Core engine types: players, rotation, state, events, errors, RNG, configuration.
//!
//! Everything here is data. The rules that mutate it live in `rules`.

pub mod player;
pub mod rotation;
pub mod rng;
pub mod config;
pub mod error;
pub mod event;
pub mod state;

pub use player::{Player, PlayerId};
pub use rotation::Rotation;
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, GameConfig, MIN_PLAYERS};
pub use error::{GameError, GameResult};
pub use event::{EliminationReason, GameEvent};
pub use state::{GameState, Phase};
