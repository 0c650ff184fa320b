use async_trait::async_trait;

use super::{bus::EventBus, events::GameEvent};
use crate::game::{Blocker, Game, PlayerInteraction};

/// Publishes every notification on the game's event channel
#[derive(Clone)]
pub struct EventBusInteraction {
    event_bus: EventBus,
}

impl EventBusInteraction {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl PlayerInteraction for EventBusInteraction {
    async fn notify_blocking(&self, player_id: &str, blocker: Blocker, game: &Game, reason: &str) {
        self.event_bus
            .emit(GameEvent::Blocking {
                game_id: game.id.clone(),
                player_id: player_id.to_string(),
                blocker,
                reason: reason.to_string(),
                phase: game.phase,
            })
            .await;
    }

    async fn notify_message(&self, player_id: &str, game: &Game, text: &str) {
        self.event_bus
            .emit(GameEvent::Message {
                game_id: game.id.clone(),
                player_id: player_id.to_string(),
                text: text.to_string(),
            })
            .await;
    }

    async fn notify_score_update(&self, game: &Game, reasons: &[String]) {
        let mut scores: Vec<_> = game
            .current_scores
            .iter()
            .map(|(color, score)| (*color, *score))
            .collect();
        scores.sort_by_key(|(color, _)| *color as u8);

        self.event_bus
            .emit(GameEvent::ScoreUpdate {
                game_id: game.id.clone(),
                reasons: reasons.to_vec(),
                scores,
            })
            .await;
    }
}
