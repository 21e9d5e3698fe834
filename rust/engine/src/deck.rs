use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

use crate::cards::{full_deck, Card};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck exhausted: no cards left to draw")]
    Exhausted,
}

/// One or more 52-card packs, no jokers. Cards are drawn from the front.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    packs: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new(n_packs: usize) -> Self {
        Self::from_rng(n_packs, ChaCha20Rng::from_os_rng())
    }

    pub fn with_seed(n_packs: usize, seed: u64) -> Self {
        Self::from_rng(n_packs, ChaCha20Rng::seed_from_u64(seed))
    }

    fn from_rng(n_packs: usize, rng: ChaCha20Rng) -> Self {
        // Keep pack order until shuffle is called explicitly
        Self {
            cards: build_packs(n_packs),
            position: 0,
            packs: n_packs,
            rng,
        }
    }

    /// Uniform permutation of the cards not yet drawn.
    pub fn shuffle(&mut self) {
        self.cards[self.position..].shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        let c = *self.cards.get(self.position).ok_or(DeckError::Exhausted)?;
        self.position += 1;
        Ok(c)
    }

    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        (0..n).map(|_| self.draw()).collect()
    }

    /// Restores every pack and forgets what was drawn. Does not shuffle.
    pub fn reset(&mut self) {
        self.cards = build_packs(self.packs);
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn packs(&self) -> usize {
        self.packs
    }
}

fn build_packs(n_packs: usize) -> Vec<Card> {
    let mut v = Vec::with_capacity(52 * n_packs);
    for _ in 0..n_packs {
        v.extend(full_deck());
    }
    v
}
