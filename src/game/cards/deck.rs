use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use super::basic::Card;

/// The undealt remainder of the deck for the current round.
///
/// Shuffling is seeded so a deck is a pure function of the game's seed and
/// the point in the action log at which it was shuffled. Replaying the same
/// log always deals the same hands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh 52-card deck shuffled `shuffles` times
    pub fn shuffled(seed: u64, salt: u64, shuffles: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed ^ salt.rotate_left(32));
        let mut cards = Card::all_cards();
        for _ in 0..shuffles {
            cards.shuffle(&mut rng);
        }
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Takes the top `count` cards, or fewer if the deck runs out
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(0..count).collect()
    }

    /// Picks the card at `fraction` of the way through the deck, 0.0 being
    /// the top card and 1.0 the bottom one. The deck itself is not altered.
    pub fn cut(&self, fraction: f64) -> Option<Card> {
        if self.cards.is_empty() || !(0.0..=1.0).contains(&fraction) {
            return None;
        }
        let last = (self.cards.len() - 1) as f64;
        let index = (last * fraction).floor() as usize;
        self.cards.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn shuffled_deck_is_deterministic() {
        let a = Deck::shuffled(42, 7, 3);
        let b = Deck::shuffled(42, 7, 3);
        assert_eq!(a, b);
        assert_eq!(a.len(), 52);

        let unique: HashSet<Card> = a.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn different_salt_changes_order() {
        let a = Deck::shuffled(42, 7, 1);
        let b = Deck::shuffled(42, 8, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn deal_removes_from_top() {
        let mut deck = Deck::shuffled(1, 1, 1);
        let top: Vec<Card> = deck.cards()[0..6].to_vec();
        let hand = deck.deal(6);
        assert_eq!(hand, top);
        assert_eq!(deck.len(), 46);
    }

    #[test]
    fn cut_picks_by_fraction() {
        let deck = Deck::shuffled(3, 0, 1);
        assert_eq!(deck.cut(0.0), Some(deck.cards()[0]));
        assert_eq!(deck.cut(1.0), Some(deck.cards()[51]));
        assert_eq!(deck.cut(0.5), Some(deck.cards()[25]));
        assert_eq!(deck.cut(1.5), None);
        assert_eq!(deck.cut(-0.1), None);
        assert_eq!(Deck::default().cut(0.5), None);
    }
}
