//! Sessions: the API the transport layer talks to.
//!
//! - `Lobby`: players gather, starting dice are chosen
//! - `GameSession`: one running game
//! - `SessionRegistry`: lobbies and games by room key, one lock per room
//! - snapshots via `GameSession::snapshot` / `GameSession::restore`

pub mod game;
pub mod lobby;
pub mod registry;
pub mod snapshot;

pub use game::{GameSession, MoveResult};
pub use lobby::Lobby;
pub use registry::{RegistryError, SessionRegistry, Table, TableHandle};
pub use snapshot::SnapshotError;
