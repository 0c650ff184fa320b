use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::{EnumCount, EnumIter};

use super::CardError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
    EnumCount,
)]
pub enum Suit {
    Spades = 0,
    Clubs = 1,
    Diamonds = 2,
    Hearts = 3,
}

impl PartialOrd for Suit {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Suit {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Spades => "S",
                Suit::Clubs => "C",
                Suit::Diamonds => "D",
                Suit::Hearts => "H",
            }
        )
    }
}

impl TryFrom<&str> for Suit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "S" => Ok(Suit::Spades),
            "C" => Ok(Suit::Clubs),
            "D" => Ok(Suit::Diamonds),
            "H" => Ok(Suit::Hearts),
            _ => Err(s.to_string()),
        }
    }
}

/// Card rank, numbered the cribbage way: Ace is low (1) and King is 13.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
    EnumCount,
)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    /// Ordinal value used for runs (Ace = 1 ... King = 13)
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Value for fifteens and the pegging count; face cards count 10
    pub fn peg_value(&self) -> u8 {
        self.value().min(10)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Ace => "A",
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
            }
        )
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "A" => Ok(Rank::Ace),
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            _ => Err(s.to_string()),
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

/// A playing card. Serialized in its compact notation, e.g. `"5H"` or `"TD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.rank.cmp(&other.rank) {
            std::cmp::Ordering::Equal => self.suit.cmp(&other.suit),
            other => other,
        }
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn peg_value(&self) -> u8 {
        self.rank.peg_value()
    }

    pub fn from_string(s: &str) -> Result<Self, CardError> {
        if s.len() != 2 || !s.is_ascii() {
            return Err(CardError::InvalidNotation(s.to_string()));
        }

        let rank =
            Rank::try_from(&s[0..1]).map_err(|_| CardError::InvalidNotation(s.to_string()))?;
        let suit =
            Suit::try_from(&s[1..2]).map_err(|_| CardError::InvalidNotation(s.to_string()))?;

        Ok(Self::new(rank, suit))
    }

    /// The 52-card deck in suit-major order
    pub fn all_cards() -> Vec<Card> {
        let mut cards = Vec::new();
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl TryFrom<String> for Card {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::from_string(&s)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn test_card_ordering() {
        let ace = Card::new(Rank::Ace, Suit::Hearts);
        let two = Card::new(Rank::Two, Suit::Spades);
        let two_hearts = Card::new(Rank::Two, Suit::Hearts);

        assert!(two > ace); // Aces are low
        assert!(two_hearts > two); // Same rank, higher suit
    }

    #[test]
    fn test_peg_values() {
        assert_eq!(Rank::Ace.peg_value(), 1);
        assert_eq!(Rank::Nine.peg_value(), 9);
        assert_eq!(Rank::Ten.peg_value(), 10);
        assert_eq!(Rank::Jack.peg_value(), 10);
        assert_eq!(Rank::Queen.peg_value(), 10);
        assert_eq!(Rank::King.peg_value(), 10);
        assert_eq!(Rank::King.value(), 13);
    }

    #[test]
    fn test_card_from_string() {
        let king_hearts = Card::from_string("KH").unwrap();
        assert_eq!(king_hearts.rank, Rank::King);
        assert_eq!(king_hearts.suit, Suit::Hearts);

        let ace_spades = Card::from_string("AS").unwrap();
        assert_eq!(ace_spades.rank, Rank::Ace);
        assert_eq!(ace_spades.suit, Suit::Spades);

        let ten_diamonds = Card::from_string("TD").unwrap();
        assert_eq!(ten_diamonds.rank, Rank::Ten);

        assert!(Card::from_string("1H").is_err()); // Invalid rank
        assert!(Card::from_string("KX").is_err()); // Invalid suit
        assert!(Card::from_string("K").is_err()); // Too short
        assert!(Card::from_string("KHS").is_err()); // Too long
        assert!(Card::from_string("").is_err());
    }

    #[test]
    fn test_card_display_round_trips_whole_deck() {
        let deck = Card::all_cards();
        assert_eq!(deck.len(), Rank::COUNT * Suit::COUNT);

        for card in deck {
            assert_eq!(Card::from_string(&card.to_string()).unwrap(), card);
        }
    }

    #[test]
    fn test_card_serializes_as_notation() {
        let card = Card::new(Rank::Five, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"5H\"");

        let parsed: Card = serde_json::from_str("\"JC\"").unwrap();
        assert_eq!(parsed, Card::new(Rank::Jack, Suit::Clubs));

        assert!(serde_json::from_str::<Card>("\"ZZ\"").is_err());
    }
}
