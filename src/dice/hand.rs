//! A player's hidden dice.

use smallvec::SmallVec;

/// Face values of one player's dice, sorted ascending.
///
/// Inline up to the usual maximum starting dice, so dealing rarely allocates.
pub type Hand = SmallVec<[u8; 10]>;

/// Number of dice in `hand` showing `face`.
#[must_use]
pub fn count_face(hand: &[u8], face: u8) -> u32 {
    hand.iter().filter(|&&f| f == face).count() as u32
}
