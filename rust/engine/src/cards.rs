use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four suits of a standard pack.
/// Serialized on the wire as its single-letter code (`C`, `D`, `H`, `S`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs (C)
    Clubs,
    /// Diamonds (D)
    Diamonds,
    /// Hearts (H)
    Hearts,
    /// Spades (S)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }

    pub fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// The rank (face value) of a card from Two through Ace.
/// Discriminants are the values used for hand comparison (2..=14).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Rank 2
    Two = 2,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
    /// Ace (14)
    Ace,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        let r = match v {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            _ => return None,
        };
        Some(r)
    }

    /// Wire label: `2`..`10`, `J`, `Q`, `K`, `A`.
    pub fn label(self) -> &'static str {
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
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    pub fn from_label(s: &str) -> Option<Rank> {
        match s.to_ascii_uppercase().as_str() {
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            "T" => Some(Rank::Ten),
            other => other.parse::<u8>().ok().and_then(Rank::from_value),
        }
    }
}

/// A single playing card. Equality and hashing are by (rank, suit).
///
/// The textual form is `"<rank><suit>"`, e.g. `"10H"` or `"AS"`, and that is
/// also how a card is serialized.
///
/// ```
/// use holdem_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "10H".parse().unwrap();
/// assert_eq!(card, Card::new(Rank::Ten, Suit::Hearts));
/// assert_eq!(card.to_string(), "10H");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    /// The rank of the card (Two through Ace)
    pub rank: Rank,
    /// The suit of the card
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn value(self) -> u8 {
        self.rank.value()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid card `{0}`: expected <rank><suit> such as 10H or AS")]
pub struct CardParseError(pub String);

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_symbol)
            .ok_or_else(|| CardParseError(s.to_string()))?;
        let rank = Rank::from_label(chars.as_str()).ok_or_else(|| CardParseError(s.to_string()))?;
        Ok(Card { rank, suit })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parses a whitespace or comma separated list of cards, e.g. `"AH KH 10H"`.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
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
    ]
}

pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { rank: r, suit: s });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_card_of_a_pack() {
        for card in full_deck() {
            let text = card.to_string();
            assert_eq!(text.parse::<Card>().unwrap(), card);
        }
    }

    #[test]
    fn ten_is_two_characters() {
        let c: Card = "10S".parse().unwrap();
        assert_eq!(c.rank, Rank::Ten);
        assert_eq!(c.value(), 10);
        assert_eq!("TS".parse::<Card>().unwrap(), c);
    }

    #[test]
    fn rejects_garbage() {
        assert!("1H".parse::<Card>().is_err());
        assert!("AX".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!("11C".parse::<Card>().is_err());
    }

    #[test]
    fn serializes_as_wire_string() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"AS\"");
        let back: Card = serde_json::from_str("\"QD\"").unwrap();
        assert_eq!(back, Card::new(Rank::Queen, Suit::Diamonds));
    }

    #[test]
    fn parse_cards_accepts_commas_and_spaces() {
        let cards = parse_cards("AH, KH QH\tJH 10H").unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4], Card::new(Rank::Ten, Suit::Hearts));
    }
}
