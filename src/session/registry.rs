//! Per-key storage of lobbies and games.
//!
//! The transport layer owns a `SessionRegistry` keyed by whatever identifies
//! a game room (a chat id, say). Each table sits behind its own mutex, so
//! moves in one room never wait on another; the map lock is only held long
//! enough to clone a handle.

use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::game::GameSession;
use super::lobby::Lobby;
use crate::core::{GameConfig, GameError};

/// What a room currently holds.
#[derive(Debug)]
pub enum Table {
    Lobby(Lobby),
    InGame(GameSession),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("a lobby or game is already open here")]
    TableExists,

    #[error("nothing is open here")]
    NoTable,

    #[error("no lobby is waiting here")]
    NotInLobby,

    #[error("no game is running here")]
    NotInGame,

    #[error("a table lock was poisoned")]
    Poisoned,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Shared handle to one room.
pub type TableHandle = Arc<Mutex<Table>>;

/// Rooms by key.
#[derive(Debug)]
pub struct SessionRegistry<K> {
    tables: Mutex<FxHashMap<K, TableHandle>>,
}

impl<K> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self {
            tables: Mutex::new(FxHashMap::default()),
        }
    }
}

impl<K: Eq + Hash + Clone> SessionRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a lobby for `key`. Fails if the room already has one or a game.
    pub fn open_lobby(&self, key: K, config: GameConfig) -> Result<TableHandle, RegistryError> {
        let lobby = Lobby::new(config)?;
        let mut tables = self.tables()?;
        if tables.contains_key(&key) {
            return Err(RegistryError::TableExists);
        }

        let handle = Arc::new(Mutex::new(Table::Lobby(lobby)));
        tables.insert(key, Arc::clone(&handle));
        Ok(handle)
    }

    /// Handle to a room, if anything is open there.
    pub fn get(&self, key: &K) -> Result<Option<TableHandle>, RegistryError> {
        Ok(self.tables()?.get(key).cloned())
    }

    /// Run `f` on the room's lobby.
    pub fn with_lobby<R>(
        &self,
        key: &K,
        f: impl FnOnce(&mut Lobby) -> Result<R, GameError>,
    ) -> Result<R, RegistryError> {
        let handle = self.get(key)?.ok_or(RegistryError::NoTable)?;
        let mut table = handle.lock().map_err(|_| RegistryError::Poisoned)?;
        match &mut *table {
            Table::Lobby(lobby) => Ok(f(lobby)?),
            Table::InGame(_) => Err(RegistryError::NotInLobby),
        }
    }

    /// Run `f` on the room's game.
    pub fn with_session<R>(
        &self,
        key: &K,
        f: impl FnOnce(&mut GameSession) -> Result<R, GameError>,
    ) -> Result<R, RegistryError> {
        let handle = self.get(key)?.ok_or(RegistryError::NoTable)?;
        let mut table = handle.lock().map_err(|_| RegistryError::Poisoned)?;
        match &mut *table {
            Table::InGame(session) => Ok(f(session)?),
            Table::Lobby(_) => Err(RegistryError::NotInGame),
        }
    }

    /// Turn the room's lobby into a running game.
    pub fn start(&self, key: &K, seed: u64) -> Result<(), RegistryError> {
        let handle = self.get(key)?.ok_or(RegistryError::NoTable)?;
        let mut table = handle.lock().map_err(|_| RegistryError::Poisoned)?;
        let session = match &*table {
            Table::Lobby(lobby) => lobby.start(seed)?,
            Table::InGame(_) => return Err(RegistryError::NotInLobby),
        };
        *table = Table::InGame(session);
        Ok(())
    }

    /// Close whatever is open for `key`. Returns true if something was closed.
    pub fn reset(&self, key: &K) -> Result<bool, RegistryError> {
        Ok(self.tables()?.remove(key).is_some())
    }

    /// Number of open rooms.
    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.tables()?.len())
    }

    fn tables(&self) -> Result<MutexGuard<'_, FxHashMap<K, TableHandle>>, RegistryError> {
        self.tables.lock().map_err(|_| RegistryError::Poisoned)
    }
}
