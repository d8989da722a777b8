//! Hand storage for the active players.
//!
//! `HandStore` owns every active player's hidden dice and the RNG that rolls
//! them. Hands are kept in deal order so rerolls consume the RNG in a stable
//! order and seeded games replay exactly.
//!
//! ## Invariants
//!
//! - Every stored hand is non-empty. The call that removes a player's last
//!   die also removes the player.
//! - Faces are always within the configured range and sorted ascending.

use serde::{Deserialize, Serialize};

use super::hand::{count_face, Hand};
use crate::core::{GameError, GameResult, GameRng, PlayerId};

/// What happened to a player's hand after losing a die.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DieRemoval {
    /// The player keeps playing with this many dice.
    Remaining(usize),
    /// The player lost their last die and is out.
    Eliminated,
}

/// Hidden dice of all active players.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandStore {
    hands: Vec<(PlayerId, Hand)>,
    min_face: u8,
    max_face: u8,
    rng: GameRng,
}

impl HandStore {
    /// Create an empty store rolling faces in `[min_face, max_face]`.
    #[must_use]
    pub fn new(min_face: u8, max_face: u8, rng: GameRng) -> Self {
        Self {
            hands: Vec::new(),
            min_face,
            max_face,
            rng,
        }
    }

    /// Give each player a fresh hand of `count` dice, replacing any previous hands.
    pub fn deal(&mut self, players: impl IntoIterator<Item = PlayerId>, count: usize) -> GameResult<()> {
        if count == 0 {
            return Err(GameError::InvariantViolation("dealt hands must hold at least one die"));
        }

        self.hands = players
            .into_iter()
            .map(|player| (player, self.rng.draw_dice(self.min_face, self.max_face, count)))
            .collect();
        Ok(())
    }

    /// Reroll every hand, keeping each hand's size.
    pub fn reroll_all(&mut self) {
        for (_, hand) in &mut self.hands {
            *hand = self.rng.draw_dice(self.min_face, self.max_face, hand.len());
        }
    }

    /// Take one die from `player`, then reroll every remaining hand.
    ///
    /// A player left with no dice is removed in the same call.
    pub fn remove_one_die(&mut self, player: PlayerId) -> GameResult<DieRemoval> {
        let index = self.index_of(player).ok_or(GameError::UnknownPlayer(player))?;

        let hand = &mut self.hands[index].1;
        hand.pop();
        let remaining = hand.len();

        if remaining == 0 {
            self.hands.remove(index);
        }
        self.reroll_all();

        Ok(match remaining {
            0 => DieRemoval::Eliminated,
            n => DieRemoval::Remaining(n),
        })
    }

    /// Drop a player and their dice without rerolling anyone else.
    pub fn remove_player(&mut self, player: PlayerId) -> Option<Hand> {
        let index = self.index_of(player)?;
        Some(self.hands.remove(index).1)
    }

    /// Dice showing `face` across all hands.
    #[must_use]
    pub fn tally(&self, face: u8) -> u32 {
        self.hands.iter().map(|(_, hand)| count_face(hand, face)).sum()
    }

    /// A single player's dice. Only ever hand this to the owner.
    #[must_use]
    pub fn peek(&self, player: PlayerId) -> Option<&[u8]> {
        self.hands
            .iter()
            .find(|(id, _)| *id == player)
            .map(|(_, hand)| hand.as_slice())
    }

    /// Number of dice a player holds.
    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> Option<usize> {
        self.peek(player).map(<[u8]>::len)
    }

    /// Hand sizes in deal order. Public information.
    #[must_use]
    pub fn hand_sizes(&self) -> Vec<(PlayerId, usize)> {
        self.hands.iter().map(|(id, hand)| (*id, hand.len())).collect()
    }

    /// Copy of every hand, for the reveal at the end of a round.
    #[must_use]
    pub fn reveal(&self) -> Vec<(PlayerId, Hand)> {
        self.hands.clone()
    }

    /// Dice in play.
    #[must_use]
    pub fn total_dice(&self) -> usize {
        self.hands.iter().map(|(_, hand)| hand.len()).sum()
    }

    /// Players holding dice.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.index_of(player).is_some()
    }

    fn index_of(&self, player: PlayerId) -> Option<usize> {
        self.hands.iter().position(|(id, _)| *id == player)
    }
}
