use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumCount, EnumIter};

use super::action::PlayerAction;
use super::cards::{Card, Deck};

pub type PlayerId = String;

/// Points needed to win
pub const WINNING_SCORE: u32 = 121;

/// Every player pegs this many cards once the crib is built
pub const CARDS_IN_PLAY: usize = 4;

/// The crib is complete once it holds this many cards
pub const CRIB_SIZE: usize = 4;

/// Scoreboard color. Partners in a four-player game share one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerColor {
    Blue,
    Red,
    Green,
}

impl PlayerColor {
    /// Color for the player sitting at `seat` in a game of `num_players`
    pub fn for_seat(seat: usize, num_players: usize) -> Self {
        let colors = if num_players == 3 { 3 } else { 2 };
        match seat % colors {
            0 => PlayerColor::Blue,
            1 => PlayerColor::Red,
            _ => PlayerColor::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
}

/// A player taking a seat in a new game. The seat decides the color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub id: PlayerId,
    pub name: String,
}

impl NewPlayer {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// What a player owes the game before it can move on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Blocker {
    DealCards,
    CribCard,
    CutCard,
    PegCard,
    CountHand,
    CountCrib,
}

/// Stage of the round. Each playing phase is preceded by a "ready" phase
/// whose only job is to hand out the blockers for the phase that follows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Deal,
    BuildCribReady,
    BuildCrib,
    CutReady,
    Cut,
    PeggingReady,
    Pegging,
    CountingReady,
    Counting,
    CribCountingReady,
    CribCounting,
    DealingReady,
}

impl Phase {
    /// The following phase in the fixed cycle, wrapping back to `Deal`
    pub fn next(self) -> Self {
        match self {
            Phase::Deal => Phase::BuildCribReady,
            Phase::BuildCribReady => Phase::BuildCrib,
            Phase::BuildCrib => Phase::CutReady,
            Phase::CutReady => Phase::Cut,
            Phase::Cut => Phase::PeggingReady,
            Phase::PeggingReady => Phase::Pegging,
            Phase::Pegging => Phase::CountingReady,
            Phase::CountingReady => Phase::Counting,
            Phase::Counting => Phase::CribCountingReady,
            Phase::CribCountingReady => Phase::CribCounting,
            Phase::CribCounting => Phase::DealingReady,
            Phase::DealingReady => Phase::Deal,
        }
    }

    pub fn is_ready(self) -> bool {
        matches!(
            self,
            Phase::BuildCribReady
                | Phase::CutReady
                | Phase::PeggingReady
                | Phase::CountingReady
                | Phase::CribCountingReady
                | Phase::DealingReady
        )
    }
}

/// A card laid during pegging, remembered with who played it and where in
/// the action log it landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeggedCard {
    pub card: Card,
    pub player_id: PlayerId,
    pub action_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub players: Vec<Player>, // Seat order; dealing and play go left through this list
    pub deck_seed: u64,
    pub phase: Phase,
    pub blocking_players: HashMap<PlayerId, Blocker>,
    pub current_dealer: PlayerId,
    pub current_scores: HashMap<PlayerColor, u32>,
    pub lag_scores: HashMap<PlayerColor, u32>, // Score before each color's latest award
    pub cut_card: Option<Card>,
    pub crib: Vec<Card>,
    pub hands: HashMap<PlayerId, Vec<Card>>,
    pub pegged_cards: Vec<PeggedCard>,
    pub actions: Vec<PlayerAction>,
    pub deck: Deck,
}

impl Game {
    /// A pristine game waiting on its first deal. Seat 0 deals first.
    pub fn new(id: String, players: Vec<Player>, deck_seed: u64) -> Self {
        let current_dealer = players.first().map(|p| p.id.clone()).unwrap_or_default();
        let current_scores = players.iter().map(|p| (p.color, 0)).collect();
        let lag_scores = players.iter().map(|p| (p.color, 0)).collect();

        Self {
            id,
            players,
            deck_seed,
            phase: Phase::Deal,
            blocking_players: HashMap::new(),
            current_dealer,
            current_scores,
            lag_scores,
            cut_card: None,
            crib: Vec::new(),
            hands: HashMap::new(),
            pegged_cards: Vec::new(),
            actions: Vec::new(),
            deck: Deck::default(),
        }
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn is_participant(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    fn seat_of(&self, player_id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    /// The player to the left of `player_id` (next in deal order)
    pub fn player_after(&self, player_id: &str) -> PlayerId {
        let seat = self.seat_of(player_id).unwrap_or(0);
        self.players[(seat + 1) % self.players.len()].id.clone()
    }

    /// The player to the right of `player_id`
    pub fn player_before(&self, player_id: &str) -> PlayerId {
        let n = self.players.len();
        let seat = self.seat_of(player_id).unwrap_or(0);
        self.players[(seat + n - 1) % n].id.clone()
    }

    /// All player IDs in deal order, starting left of `player_id`
    pub fn players_after(&self, player_id: &str) -> Vec<PlayerId> {
        let n = self.players.len();
        let seat = self.seat_of(player_id).unwrap_or(0);
        (1..=n)
            .map(|offset| self.players[(seat + offset) % n].id.clone())
            .collect()
    }

    pub fn color_of(&self, player_id: &str) -> Option<PlayerColor> {
        self.player(player_id).map(|p| p.color)
    }

    pub fn player_name(&self, player_id: &str) -> String {
        self.player(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string())
    }

    /// Cards dealt to each player at the start of a round. Everyone but a
    /// two-player table deals 5, so after tossing there are 4 to peg and the
    /// crib still fills to 4.
    pub fn hand_size(&self) -> usize {
        match self.players.len() {
            2 => 6,
            _ => 5,
        }
    }

    /// Cards each player contributes to the crib
    pub fn crib_cards_per_player(&self) -> usize {
        match self.players.len() {
            2 => 2,
            _ => 1,
        }
    }

    pub fn score(&self, color: PlayerColor) -> u32 {
        self.current_scores.get(&color).copied().unwrap_or_default()
    }

    pub fn lag_score(&self, color: PlayerColor) -> u32 {
        self.lag_scores.get(&color).copied().unwrap_or_default()
    }

    /// Adds points to a color, remembering the score it had before
    pub fn add_points(&mut self, color: PlayerColor, points: u32) {
        if points == 0 {
            return;
        }
        let current = self.score(color);
        self.lag_scores.insert(color, current);
        self.current_scores.insert(color, current + points);
    }

    pub fn winner(&self) -> Option<PlayerColor> {
        self.current_scores
            .iter()
            .filter(|(_, score)| **score >= WINNING_SCORE)
            .max_by_key(|(_, score)| **score)
            .map(|(color, _)| *color)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn hand(&self, player_id: &str) -> &[Card] {
        self.hands.get(player_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_pegged(&self, card: &Card) -> bool {
        self.pegged_cards.iter().any(|pc| pc.card == *card)
    }

    /// Cards from `player_id`'s hand not yet laid this round
    pub fn unplayed_cards(&self, player_id: &str) -> Vec<Card> {
        self.hand(player_id)
            .iter()
            .filter(|card| !self.has_pegged(card))
            .copied()
            .collect()
    }

    pub fn block(&mut self, player_id: &str, blocker: Blocker) {
        self.blocking_players.insert(player_id.to_string(), blocker);
    }

    pub fn unblock(&mut self, player_id: &str) {
        self.blocking_players.remove(player_id);
    }

    pub fn blocker_for(&self, player_id: &str) -> Option<Blocker> {
        self.blocking_players.get(player_id).copied()
    }
}
