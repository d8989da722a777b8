//! Session checkpoints.
//!
//! A snapshot is the bincode encoding of the full game state, including the
//! RNG position, so a restored session rolls exactly the dice the original
//! would have. Queued events are not part of a snapshot; drain them first.

use thiserror::Error;

use super::game::GameSession;
use crate::core::{GameState, Phase};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("snapshot holds an inconsistent game: {0}")]
    Inconsistent(&'static str),
}

impl GameSession {
    /// Encode the session.
    pub fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.state)?)
    }

    /// Decode a session produced by [`GameSession::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let state: GameState = bincode::deserialize(bytes)?;
        check_consistent(&state)?;
        Ok(Self { state })
    }
}

fn check_consistent(state: &GameState) -> Result<(), SnapshotError> {
    if state.rotation.is_empty() {
        return Err(SnapshotError::Inconsistent("no players"));
    }
    if state.rotation.current_index() >= state.rotation.len() {
        return Err(SnapshotError::Inconsistent("turn pointer out of range"));
    }
    if state.phase == Phase::GameOver {
        return match state.winner {
            Some(_) => Ok(()),
            None => Err(SnapshotError::Inconsistent("finished game without a winner")),
        };
    }
    if state.rotation.len() != state.hands.len() || !state.rotation.ids().all(|id| state.hands.contains(id)) {
        return Err(SnapshotError::Inconsistent("seated players and hands disagree"));
    }
    Ok(())
}
