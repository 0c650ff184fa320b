pub mod basic;
pub mod deck;

pub use basic::{Card, Rank, Suit};
pub use deck::Deck;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    #[error("Invalid card notation: {0:?}")]
    InvalidNotation(String),
}

/// Space-separated card notation, e.g. `"5H JC KS"`
pub fn cards_to_string(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
