//! Per-combatant deck model: draw pile, hand and discard pile.
//!
//! All pile mutation goes through [`DeckState`]'s own operations. The piles
//! are private so no other part of the engine can splice them directly.
//!
//! # Conservation
//!
//! Outside of [`DeckState::rebuild`], cards only move between piles: the
//! combined size of the three piles is constant for the whole encounter.
//! Temporary weapon actions never enter any pile.

use std::collections::VecDeque;

use crate::env::{RngOracle, shuffle};
use crate::state::ActionId;

/// Draw pile, hand and discard pile of one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckState {
    draw_pile: VecDeque<ActionId>,
    hand: Vec<ActionId>,
    discard_pile: Vec<ActionId>,
}

impl DeckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a deck from explicit piles (draw pile front is drawn first).
    pub fn from_piles(
        draw_pile: impl IntoIterator<Item = ActionId>,
        hand: impl IntoIterator<Item = ActionId>,
        discard_pile: impl IntoIterator<Item = ActionId>,
    ) -> Self {
        Self {
            draw_pile: draw_pile.into_iter().collect(),
            hand: hand.into_iter().collect(),
            discard_pile: discard_pile.into_iter().collect(),
        }
    }

    pub fn draw_pile(&self) -> impl ExactSizeIterator<Item = &ActionId> {
        self.draw_pile.iter()
    }

    pub fn hand(&self) -> &[ActionId] {
        &self.hand
    }

    pub fn discard_pile(&self) -> &[ActionId] {
        &self.discard_pile
    }

    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Total number of cards across all three piles.
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len() + self.hand.len() + self.discard_pile.len()
    }

    /// Empties all three piles.
    pub fn reset(&mut self) {
        self.draw_pile.clear();
        self.hand.clear();
        self.discard_pile.clear();
    }

    /// Resets the deck and stocks the draw pile with `actions`.
    ///
    /// Duplicates are dropped (first occurrence wins) before the draw pile is
    /// shuffled. Returns the number of distinct cards stocked.
    pub fn rebuild<R>(&mut self, actions: impl IntoIterator<Item = ActionId>, rng: &mut R) -> usize
    where
        R: RngOracle + ?Sized,
    {
        self.reset();
        for action in actions {
            if !self.draw_pile.contains(&action) {
                self.draw_pile.push_back(action);
            }
        }
        shuffle(rng, self.draw_pile.make_contiguous());
        self.draw_pile.len()
    }

    /// Moves up to `n` cards from the front of the draw pile into the hand.
    ///
    /// When the draw pile runs dry the discard pile is reshuffled into it and
    /// drawing continues. Stops early once both piles are empty. Returns the
    /// number of cards actually drawn.
    pub fn draw_cards<R>(&mut self, n: usize, rng: &mut R) -> usize
    where
        R: RngOracle + ?Sized,
    {
        let mut drawn = 0;
        while drawn < n {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.reshuffle(rng);
            }
            match self.draw_pile.pop_front() {
                Some(card) => {
                    self.hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Moves the whole hand onto the discard pile. Returns the number moved.
    pub fn discard_hand(&mut self) -> usize {
        let moved = self.hand.len();
        self.discard_pile.append(&mut self.hand);
        moved
    }

    /// Appends the discard pile to the draw pile and shuffles the result.
    pub fn reshuffle<R>(&mut self, rng: &mut R)
    where
        R: RngOracle + ?Sized,
    {
        self.draw_pile.extend(self.discard_pile.drain(..));
        shuffle(rng, self.draw_pile.make_contiguous());
        tracing::trace!(cards = self.draw_pile.len(), "reshuffled discard pile");
    }
}
