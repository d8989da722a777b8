//! Waiting for players.
//!
//! A `Lobby` collects players and the starting dice count before a game
//! begins. Each lobby owns its roster; nothing is shared between lobbies.

use serde::{Deserialize, Serialize};

use super::game::GameSession;
use crate::core::{GameConfig, GameError, GameResult, Player, PlayerId, MIN_PLAYERS};

/// Players gathered for the next game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lobby {
    config: GameConfig,
    players: Vec<Player>,
}

impl Lobby {
    /// Open an empty lobby.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            players: Vec::new(),
        })
    }

    /// Add a player.
    pub fn join(&mut self, player: Player) -> GameResult<()> {
        if self.players.contains(&player) {
            return Err(GameError::AlreadyJoined(player.id));
        }
        if self.players.len() >= self.config.max_players {
            return Err(GameError::LobbyFull {
                max: self.config.max_players,
            });
        }

        log::info!("{} ({}) joined the lobby", player.name, player.id);
        self.players.push(player);
        Ok(())
    }

    /// Remove a player before the game starts.
    pub fn leave(&mut self, id: PlayerId) -> GameResult<Player> {
        let index = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(GameError::UnknownPlayer(id))?;
        Ok(self.players.remove(index))
    }

    /// Change how many dice everyone starts with.
    pub fn set_starting_dice(&mut self, count: usize) -> GameResult<()> {
        self.config.check_starting_dice(count)?;
        self.config.starting_dice = count;
        Ok(())
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shuffle the seating and start the game.
    ///
    /// The lobby is left as it was, so a failed start can be retried.
    pub fn start(&self, seed: u64) -> GameResult<GameSession> {
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                have: self.players.len(),
                need: MIN_PLAYERS,
            });
        }

        log::info!(
            "starting game: {} players, {} dice each",
            self.players.len(),
            self.config.starting_dice
        );
        GameSession::shuffled(self.players.clone(), self.config.clone(), seed)
    }
}
