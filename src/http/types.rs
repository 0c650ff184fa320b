use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game::{Blocker, Game, NewPlayer, Phase, PlayerColor};

/// Request payload for creating a new game
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameRequest {
    /// Human players in seat order
    pub players: Vec<NewPlayer>,
    /// Automated players seated after the humans
    #[serde(default)]
    pub npcs: usize,
    /// Fixes every deal of the game; random when absent
    #[serde(default)]
    pub deck_seed: Option<u64>,
}

/// Who the game is waiting on and the score, without the full state
#[derive(Debug, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: String,
    pub phase: Phase,
    pub dealer: String,
    pub waiting_on: Vec<(String, Blocker)>,
    pub scores: Vec<(PlayerColor, u32)>,
    pub actions: usize,
    pub winner: Option<PlayerColor>,
    pub updated_at: DateTime<Utc>,
}

impl GameSummary {
    pub fn new(game: &Game, updated_at: DateTime<Utc>) -> Self {
        let waiting_on = game
            .players
            .iter()
            .filter_map(|p| game.blocker_for(&p.id).map(|b| (p.id.clone(), b)))
            .collect();
        let mut scores: Vec<(PlayerColor, u32)> = game
            .current_scores
            .iter()
            .map(|(color, score)| (*color, *score))
            .collect();
        scores.sort_by_key(|(color, _)| *color as u8);

        Self {
            id: game.id.clone(),
            phase: game.phase,
            dealer: game.current_dealer.clone(),
            waiting_on,
            scores,
            actions: game.actions.len(),
            winner: game.winner(),
            updated_at,
        }
    }
}
