use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::domain::value_objects::Card;

/// Hand storage; stays inline for typical hand sizes, spills after penalties.
pub type Hand = SmallVec<[Card; 16]>;

/// A seated player. Lookups always go through the match; the player holds no
/// back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Insertion order is preserved; sorting is a client concern.
    pub hand: Hand,
    /// Finished the current round (hand emptied).
    pub safe: bool,
    /// Out of the tournament.
    pub eliminated: bool,
    /// Liveness hint maintained by the transport layer.
    pub connected: bool,
}

impl Player {
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            hand: Hand::new(),
            safe: false,
            eliminated: false,
            connected: true,
        }
    }

    /// Remove one card matching structurally. Returns false when absent.
    pub fn remove_card(&mut self, card: &Card) -> bool {
        if let Some(pos) = self.hand.iter().position(|c| c == card) {
            self.hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Multiset containment check: every requested card must be covered by a
    /// distinct copy in the hand.
    pub fn owns_all(&self, cards: &[Card]) -> bool {
        let mut remaining: Vec<Card> = self.hand.to_vec();
        for card in cards {
            match remaining.iter().position(|c| c == card) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_owns_all_counts_copies() {
        let mut player = Player::new("p1".into(), "Alice".into());
        player.hand.push(card(Rank::Four, Suit::Clubs));
        player.hand.push(card(Rank::Four, Suit::Hearts));

        assert!(player.owns_all(&[card(Rank::Four, Suit::Clubs)]));
        assert!(player.owns_all(&[
            card(Rank::Four, Suit::Clubs),
            card(Rank::Four, Suit::Hearts)
        ]));
        // Two copies of the same card need two copies in hand.
        assert!(!player.owns_all(&[
            card(Rank::Four, Suit::Clubs),
            card(Rank::Four, Suit::Clubs)
        ]));
    }

    #[test]
    fn test_remove_card_preserves_order() {
        let mut player = Player::new("p1".into(), "Alice".into());
        player.hand.push(card(Rank::Two, Suit::Clubs));
        player.hand.push(card(Rank::Five, Suit::Hearts));
        player.hand.push(card(Rank::Nine, Suit::Spades));

        assert!(player.remove_card(&card(Rank::Five, Suit::Hearts)));
        assert_eq!(
            player.hand.to_vec(),
            vec![card(Rank::Two, Suit::Clubs), card(Rank::Nine, Suit::Spades)]
        );
        assert!(!player.remove_card(&card(Rank::Five, Suit::Hearts)));
    }
}
