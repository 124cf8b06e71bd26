//! Deck factory and shuffling.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::value_objects::{Card, Rank, Suit};

/// Number of cards in one deck.
pub const DECK_SIZE: usize = 52;

/// Build the 52 distinct cards, one per (suit, rank).
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for &suit in &Suit::ALL {
        for &rank in &Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// A freshly shuffled deck (Fisher-Yates via `SliceRandom`).
pub fn shuffled_deck(rng: &mut ChaCha8Rng) -> Vec<Card> {
    let mut deck = standard_deck();
    deck.shuffle(rng);
    deck
}

/// RNG for a match: seeded for deterministic tests, entropy otherwise.
pub fn match_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
