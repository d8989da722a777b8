//! Dice: hands and the store that owns them.
//!
//! Hand contents are private to their owner. Everything that leaves this
//! module for other players is a size or a tally, except for the reveal at
//! the end of a challenged round.

pub mod hand;
pub mod store;

pub use hand::{count_face, Hand};
pub use store::{DieRemoval, HandStore};
