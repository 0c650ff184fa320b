use serde::{Deserialize, Serialize};

use crate::game::{Blocker, Phase, PlayerColor};

/// Events published for a game
///
/// Events represent facts about things that have already happened. Each one
/// mirrors a notification the rules engine produced for a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A player owes the game a move
    Blocking {
        game_id: String,
        player_id: String,
        blocker: Blocker,
        reason: String,
        phase: Phase,
    },

    /// Something a player should be told
    Message {
        game_id: String,
        player_id: String,
        text: String,
    },

    /// Points were awarded
    ScoreUpdate {
        game_id: String,
        reasons: Vec<String>,
        scores: Vec<(PlayerColor, u32)>,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> &str {
        match self {
            GameEvent::Blocking { game_id, .. } => game_id,
            GameEvent::Message { game_id, .. } => game_id,
            GameEvent::ScoreUpdate { game_id, .. } => game_id,
        }
    }

    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::Blocking { .. } => "blocking",
            GameEvent::Message { .. } => "message",
            GameEvent::ScoreUpdate { .. } => "score_update",
        }
    }
}
