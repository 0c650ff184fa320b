use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::GameEvent;

/// Event bus for distributing events throughout the application
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Game-specific event channels: game_id -> sender
    game_channels: Arc<RwLock<HashMap<String, broadcast::Sender<GameEvent>>>>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new event bus whose per-game channels buffer `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            game_channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    /// Emits an event to all subscribers of its game
    pub async fn emit(&self, event: GameEvent) {
        let game_id = event.game_id().to_string();
        // Only subscribing opens a channel, so a closed game stays closed
        let Some(sender) = self.game_channels.read().await.get(&game_id).cloned() else {
            debug!(game_id = %game_id, "Game event emitted with no channel");
            return;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(
                    game_id = %game_id,
                    receivers = receiver_count,
                    "Game event emitted"
                );
            }
            Err(_) => {
                debug!(game_id = %game_id, "Game event emitted with no receivers");
            }
        }
    }

    /// Subscribe to events for a specific game
    pub async fn subscribe(&self, game_id: &str) -> broadcast::Receiver<GameEvent> {
        self.sender(game_id).await.subscribe()
    }

    /// Drops the channel for a finished game. Subscribers see the stream end.
    pub async fn close(&self, game_id: &str) {
        let mut game_channels = self.game_channels.write().await;
        if game_channels.remove(game_id).is_some() {
            debug!(game_id = %game_id, "Game channel closed");
        }
    }

    async fn sender(&self, game_id: &str) -> broadcast::Sender<GameEvent> {
        {
            let game_channels = self.game_channels.read().await;
            if let Some(sender) = game_channels.get(game_id) {
                return sender.clone();
            }
        }

        debug!(game_id = %game_id, "Creating new game channel");
        let mut game_channels = self.game_channels.write().await;
        game_channels
            .entry(game_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}
