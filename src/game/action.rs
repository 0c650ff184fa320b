use serde::{Deserialize, Serialize};

use super::cards::Card;
use super::model::{Blocker, PlayerId};

/// The body of a move. The tag names the blocker the move claims to resolve,
/// so the shape of the data always agrees with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "overcomes", content = "data", rename_all = "snake_case")]
pub enum ActionPayload {
    DealCards { num_shuffles: u32 },
    CribCard { cards: Vec<Card> },
    CutCard { fraction: f64 },
    /// `None` says "go"
    PegCard { card: Option<Card> },
    CountHand { points: u32 },
    CountCrib { points: u32 },
}

impl ActionPayload {
    pub fn blocker(&self) -> Blocker {
        match self {
            ActionPayload::DealCards { .. } => Blocker::DealCards,
            ActionPayload::CribCard { .. } => Blocker::CribCard,
            ActionPayload::CutCard { .. } => Blocker::CutCard,
            ActionPayload::PegCard { .. } => Blocker::PegCard,
            ActionPayload::CountHand { .. } => Blocker::CountHand,
            ActionPayload::CountCrib { .. } => Blocker::CountCrib,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub game_id: String,
    pub player_id: PlayerId,
    pub payload: ActionPayload,
}

impl PlayerAction {
    pub fn new(game_id: &str, player_id: &str, payload: ActionPayload) -> Self {
        Self {
            game_id: game_id.to_string(),
            player_id: player_id.to_string(),
            payload,
        }
    }

    pub fn overcomes(&self) -> Blocker {
        self.payload.blocker()
    }

    /// The card laid, if this is a pegging play rather than a go
    pub fn pegged_card(&self) -> Option<Card> {
        match self.payload {
            ActionPayload::PegCard { card } => card,
            _ => None,
        }
    }

    pub fn is_go(&self) -> bool {
        matches!(self.payload, ActionPayload::PegCard { card: None })
    }
}
