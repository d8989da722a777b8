//! Turn rotation over the active players.
//!
//! `Rotation` owns the seating order and the pointer to whoever acts next.
//! Seating is fixed when the game starts and only shrinks through
//! [`Rotation::remove`], which is the one place that re-targets the pointer
//! after an elimination.
//!
//! ## Pointer rules
//!
//! - The pointer is always `< len()` while any player is seated.
//! - Removing a seat before the pointer keeps the pointer on the same player.
//! - Removing the seat under the pointer moves it to whoever takes that seat
//!   (the next player, wrapping to the first seat).

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// Seating order plus the current-turn pointer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    seats: Vec<Player>,
    current: usize,
}

impl Rotation {
    /// Create a rotation with the pointer on the first seat.
    #[must_use]
    pub fn new(seats: Vec<Player>) -> Self {
        Self { seats, current: 0 }
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// True once every player has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Seat index of the player whose turn it is.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> Option<&Player> {
        self.seats.get(self.current)
    }

    /// Seat index of the player who acted immediately before the current one.
    #[must_use]
    pub fn previous_index(&self) -> usize {
        if self.seats.is_empty() {
            return 0;
        }
        (self.current + self.seats.len() - 1) % self.seats.len()
    }

    /// Player at a seat index.
    #[must_use]
    pub fn seat(&self, index: usize) -> Option<&Player> {
        self.seats.get(index)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|p| p.id == player)
    }

    /// Is this player still seated?
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.position(player).is_some()
    }

    /// Pass the turn to the next seat, wrapping around.
    pub fn advance(&mut self) {
        if !self.seats.is_empty() {
            self.current = (self.current + 1) % self.seats.len();
        }
    }

    /// Point at a seat index (taken modulo the seat count).
    pub fn set_current(&mut self, index: usize) {
        self.current = if self.seats.is_empty() {
            0
        } else {
            index % self.seats.len()
        };
    }

    /// Remove a player, re-targeting the pointer.
    ///
    /// Returns the seat index the player occupied.
    pub fn remove(&mut self, player: PlayerId) -> Option<(usize, Player)> {
        let index = self.position(player)?;
        let removed = self.seats.remove(index);

        if index < self.current {
            self.current -= 1;
        }
        if self.current >= self.seats.len() {
            self.current = 0;
        }

        Some((index, removed))
    }

    /// Iterate over seated players in turn order, starting from seat 0.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter()
    }

    /// Seated player ids in turn order.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats.iter().map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seats(n: u64) -> Rotation {
        Rotation::new((0..n).map(|i| Player::new(i, format!("p{}", i))).collect())
    }

    fn current_id(rotation: &Rotation) -> u64 {
        rotation.current().unwrap().id.raw()
    }

    #[test]
    fn test_advance_wraps() {
        let mut r = seats(3);
        assert_eq!(current_id(&r), 0);
        r.advance();
        r.advance();
        assert_eq!(current_id(&r), 2);
        r.advance();
        assert_eq!(current_id(&r), 0);
    }

    #[test]
    fn test_previous_index_wraps() {
        let mut r = seats(4);
        assert_eq!(r.previous_index(), 3);
        r.set_current(2);
        assert_eq!(r.previous_index(), 1);
    }

    #[test]
    fn test_set_current_is_modular() {
        let mut r = seats(3);
        r.set_current(7);
        assert_eq!(r.current_index(), 1);
    }

    #[test]
    fn test_remove_before_pointer_keeps_player() {
        let mut r = seats(4);
        r.set_current(2);

        let (slot, removed) = r.remove(PlayerId::new(0)).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(removed.id, PlayerId::new(0));
        assert_eq!(current_id(&r), 2);
    }

    #[test]
    fn test_remove_under_pointer_moves_to_next() {
        let mut r = seats(4);
        r.set_current(1);

        r.remove(PlayerId::new(1));
        assert_eq!(r.current_index(), 1);
        assert_eq!(current_id(&r), 2);
    }

    #[test]
    fn test_remove_last_seat_under_pointer_wraps() {
        let mut r = seats(3);
        r.set_current(2);

        r.remove(PlayerId::new(2));
        assert_eq!(current_id(&r), 0);
    }

    #[test]
    fn test_remove_previous_across_wrap() {
        // Pointer on seat 0, previous player sits in the last seat.
        let mut r = seats(3);
        let previous = r.seat(r.previous_index()).unwrap().id;
        assert_eq!(previous, PlayerId::new(2));

        r.remove(previous);
        assert_eq!(current_id(&r), 0);
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_remove_unknown_player() {
        let mut r = seats(2);
        assert!(r.remove(PlayerId::new(99)).is_none());
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn test_remove_everyone() {
        let mut r = seats(2);
        r.remove(PlayerId::new(0));
        r.remove(PlayerId::new(1));
        assert!(r.is_empty());
        assert!(r.current().is_none());
        assert_eq!(r.previous_index(), 0);
    }
}
