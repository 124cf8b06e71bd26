//! Card value types: suit, rank and the effect classification.
//!
//! Cards carry no identity for rule purposes; equality is structural on
//! (suit, rank). The canonical string form "<Rank> of <Suit>" is the only
//! place ranks and suits appear as strings.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Hearts" => Some(Suit::Hearts),
            "Diamonds" => Some(Suit::Diamonds),
            "Clubs" => Some(Suit::Clubs),
            "Spades" => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Card rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "2" => Some(Rank::Two),
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "Jack" => Some(Rank::Jack),
            "Queen" => Some(Rank::Queen),
            "King" => Some(Rank::King),
            "Ace" => Some(Rank::Ace),
            _ => None,
        }
    }
}

/// A playing card. Serialised on the wire as "<Rank> of <Suit>".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { suit, rank }
    }

    /// Classify the card into its rule effect.
    pub fn effect(&self) -> CardEffect {
        match self.rank {
            Rank::Jack => CardEffect::Skip,
            Rank::Queen => CardEffect::Reverse,
            Rank::Ace => CardEffect::Draw(4),
            Rank::Two => CardEffect::Draw(2),
            Rank::Eight => CardEffect::Wild,
            _ => CardEffect::Normal,
        }
    }

    /// Ace or 2, the ranks that feed the draw stack.
    pub fn is_draw_card(&self) -> bool {
        matches!(self.rank, Rank::Ace | Rank::Two)
    }

    pub fn is_wild(&self) -> bool {
        self.rank == Rank::Eight
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.as_str(), self.suit.as_str())
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rank, suit) = s
            .split_once(" of ")
            .ok_or_else(|| format!("malformed card string: {}", s))?;
        let rank = Rank::from_str(rank).ok_or_else(|| format!("unknown rank: {}", rank))?;
        let suit = Suit::from_str(suit).ok_or_else(|| format!("unknown suit: {}", suit))?;
        Ok(Card { suit, rank })
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Rule effect of a card, used by the effect resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    Skip,
    Reverse,
    Draw(u8),
    Wild,
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_string_form() {
        let card = Card::new(Rank::Queen, Suit::Hearts);
        assert_eq!(card.to_string(), "Queen of Hearts");
        assert_eq!("Queen of Hearts".parse::<Card>().unwrap(), card);
        assert_eq!(Card::new(Rank::Ten, Suit::Spades).to_string(), "10 of Spades");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("Queen of Cups".parse::<Card>().is_err());
        assert!("Joker".parse::<Card>().is_err());
        assert!("queen of hearts".parse::<Card>().is_err()); // case-sensitive
    }

    #[test]
    fn test_effect_classification() {
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).effect(), CardEffect::Skip);
        assert_eq!(Card::new(Rank::Queen, Suit::Clubs).effect(), CardEffect::Reverse);
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).effect(), CardEffect::Draw(4));
        assert_eq!(Card::new(Rank::Two, Suit::Clubs).effect(), CardEffect::Draw(2));
        assert_eq!(Card::new(Rank::Eight, Suit::Clubs).effect(), CardEffect::Wild);
        assert_eq!(Card::new(Rank::King, Suit::Clubs).effect(), CardEffect::Normal);
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::new(Rank::Ace, Suit::Diamonds);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"Ace of Diamonds\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
