use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::simple_strategy::SimpleNpc;
use super::types::{NpcPlayer, NpcStrategy};

#[derive(Clone)]
struct RegisteredNpc {
    player: NpcPlayer,
    strategy: Arc<dyn NpcStrategy>,
}

/// Which players are automated and how each one plays. Passed explicitly to
/// whatever needs it.
#[derive(Default)]
pub struct NpcRegistry {
    npcs: RwLock<HashMap<String, RegisteredNpc>>,
}

impl NpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an NPC playing `SimpleNpc`
    pub async fn create_npc(&self) -> NpcPlayer {
        let player = NpcPlayer::new();
        self.register(player.clone(), Arc::new(SimpleNpc::new())).await;
        player
    }

    pub async fn register(&self, player: NpcPlayer, strategy: Arc<dyn NpcStrategy>) {
        info!(
            npc_id = %player.id,
            npc_name = %player.name,
            strategy = strategy.strategy_name(),
            "Registering NPC"
        );
        let mut npcs = self.npcs.write().await;
        npcs.insert(player.id.clone(), RegisteredNpc { player, strategy });
    }

    pub async fn remove(&self, player_id: &str) -> Option<NpcPlayer> {
        let mut npcs = self.npcs.write().await;
        let removed = npcs.remove(player_id).map(|npc| npc.player);
        if removed.is_some() {
            debug!(npc_id = %player_id, "Removed NPC");
        }
        removed
    }

    pub async fn get(&self, player_id: &str) -> Option<NpcPlayer> {
        let npcs = self.npcs.read().await;
        npcs.get(player_id).map(|npc| npc.player.clone())
    }

    pub async fn strategy_for(&self, player_id: &str) -> Option<Arc<dyn NpcStrategy>> {
        let npcs = self.npcs.read().await;
        npcs.get(player_id).map(|npc| npc.strategy.clone())
    }

    pub async fn is_npc(&self, player_id: &str) -> bool {
        self.npcs.read().await.contains_key(player_id)
    }

    pub async fn len(&self) -> usize {
        self.npcs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.npcs.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_npcs_are_registered() {
        let registry = NpcRegistry::new();
        let npc = registry.create_npc().await;

        assert!(NpcPlayer::is_npc_id(&npc.id));
        assert!(npc.name.ends_with(" Bot"));
        assert!(registry.is_npc(&npc.id).await);
        assert_eq!(
            registry.strategy_for(&npc.id).await.unwrap().strategy_name(),
            "SimpleNpc"
        );
        assert!(!registry.is_npc("alice").await);
    }

    #[tokio::test]
    async fn registries_are_independent() {
        let first = NpcRegistry::new();
        let second = NpcRegistry::new();
        let npc = first.create_npc().await;

        assert_eq!(first.len().await, 1);
        assert!(second.is_empty().await);
        assert!(second.get(&npc.id).await.is_none());
    }

    #[tokio::test]
    async fn removed_npcs_stop_playing() {
        let registry = NpcRegistry::new();
        let npc = registry.create_npc().await;

        assert_eq!(registry.remove(&npc.id).await, Some(npc.clone()));
        assert!(registry.strategy_for(&npc.id).await.is_none());
        assert_eq!(registry.remove(&npc.id).await, None);
    }
}
