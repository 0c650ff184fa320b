use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{ActionPayload, Blocker, Game, NewPlayer};

pub const NPC_ID_PREFIX: &str = "npc-";

/// An automated seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcPlayer {
    pub id: String,   // "npc-" followed by a UUID
    pub name: String, // Display name, e.g. "merry-otter Bot"
}

impl NpcPlayer {
    /// Create an NPC with a unique ID and a generated name
    pub fn new() -> Self {
        let id = format!("{}{}", NPC_ID_PREFIX, Uuid::new_v4());
        let petname = petname::Petnames::default().generate_one(2, "-");
        let name = format!("{} Bot", petname);
        Self { id, name }
    }

    /// Check if an ID belongs to an NPC
    pub fn is_npc_id(id: &str) -> bool {
        id.starts_with(NPC_ID_PREFIX)
    }

    pub fn seat(&self) -> NewPlayer {
        NewPlayer::new(&self.id, &self.name)
    }
}

impl Default for NpcPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides an NPC's moves
#[async_trait]
pub trait NpcStrategy: Send + Sync {
    /// The move resolving `blocker` for `player_id`, or `None` when the
    /// strategy has nothing to offer
    async fn decide(&self, game: &Game, player_id: &str, blocker: Blocker) -> Option<ActionPayload>;

    /// Get the name of this strategy
    fn strategy_name(&self) -> &'static str;
}
