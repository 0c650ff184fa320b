use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::event::{EventBus, EventError, GameEvent, GameEventHandler};
use crate::game::{Blocker, GameService, PlayerAction};
use crate::shared::{release_game, AppError};

use super::registry::NpcRegistry;

/// Answers blocking notifications addressed to NPCs by submitting their
/// moves through the game service. Once an NPC's move ends the game, the
/// game's channel and NPCs are released.
pub struct NpcSubscriber {
    registry: Arc<NpcRegistry>,
    game_service: Arc<GameService>,
    event_bus: EventBus,
    delay: Duration,
}

impl NpcSubscriber {
    pub fn new(
        registry: Arc<NpcRegistry>,
        game_service: Arc<GameService>,
        event_bus: EventBus,
        delay: Duration,
    ) -> Self {
        Self {
            registry,
            game_service,
            event_bus,
            delay,
        }
    }

    async fn take_turn(
        &self,
        game_id: &str,
        player_id: &str,
        blocker: Blocker,
    ) -> Result<(), EventError> {
        let Some(strategy) = self.registry.strategy_for(player_id).await else {
            debug!(game_id = %game_id, player_id = %player_id, "Blocking a human, nothing to do");
            return Ok(());
        };

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let game = self
            .game_service
            .get_game(game_id)
            .await
            .map_err(|e| EventError::non_retryable(e.to_string()))?;

        // Someone may have moved since the event went out
        if game.blocker_for(player_id) != Some(blocker) {
            debug!(
                game_id = %game_id,
                player_id = %player_id,
                blocker = %blocker,
                "NPC no longer blocking, skipping move"
            );
            return Ok(());
        }

        let payload = strategy
            .decide(&game, player_id, blocker)
            .await
            .ok_or_else(|| {
                EventError::non_retryable(format!("{} has no move for {}", player_id, blocker))
            })?;

        info!(
            game_id = %game_id,
            player_id = %player_id,
            blocker = %blocker,
            "NPC moving"
        );
        match self
            .game_service
            .handle_action(PlayerAction::new(game_id, player_id, payload))
            .await
        {
            Ok(game) if game.is_over() => {
                let player_ids: Vec<String> = game.players.iter().map(|p| p.id.clone()).collect();
                release_game(&self.event_bus, &self.registry, game_id, &player_ids).await;
                Ok(())
            }
            Ok(_) => Ok(()),
            // Lost a race to another move; a retry reloads the game
            Err(AppError::Conflict(msg)) => Err(EventError::retryable(msg)),
            Err(e) => Err(EventError::non_retryable(e.to_string())),
        }
    }
}

#[async_trait]
impl GameEventHandler for NpcSubscriber {
    async fn handle_game_event(&self, game_id: &str, event: GameEvent) -> Result<(), EventError> {
        match event {
            GameEvent::Blocking {
                player_id, blocker, ..
            } => self.take_turn(game_id, &player_id, blocker).await,
            GameEvent::Message { .. } | GameEvent::ScoreUpdate { .. } => Ok(()),
        }
    }

    fn handler_name(&self) -> &'static str {
        "NpcSubscriber"
    }
}
