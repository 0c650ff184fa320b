use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::shared::AppError;

use super::action::PlayerAction;
use super::controller::PhaseController;
use super::model::{Game, NewPlayer};
use super::notify::{Notification, Outbox, PlayerInteraction};
use super::repository::GameRepository;

/// Runs moves against stored games and tells players what happened
pub struct GameService {
    repository: Arc<dyn GameRepository>,
    interaction: Arc<dyn PlayerInteraction>,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn GameRepository>,
        interaction: Arc<dyn PlayerInteraction>,
    ) -> Self {
        Self {
            repository,
            interaction,
        }
    }

    /// Creates a game with a fresh ID and a random deck seed
    pub async fn create_game(&self, players: &[NewPlayer]) -> Result<Game, AppError> {
        let game_id = Uuid::new_v4().to_string();
        self.create_game_with_seed(&game_id, players, rand::random())
            .await
    }

    /// Creates a game whose deals are fixed by `deck_seed`
    pub async fn create_game_with_seed(
        &self,
        game_id: &str,
        players: &[NewPlayer],
        deck_seed: u64,
    ) -> Result<Game, AppError> {
        let mut outbox = Outbox::new();
        let game = PhaseController::new_game(game_id, players, deck_seed, &mut outbox)?;
        self.repository.create(&game).await?;

        info!(game_id = %game.id, "Game stored");
        self.dispatch(&game, outbox).await;
        Ok(game)
    }

    /// Loads the game, applies `action` and saves the result. Players hear
    /// about the outcome whether or not the move was accepted.
    pub async fn handle_action(&self, action: PlayerAction) -> Result<Game, AppError> {
        let mut game = self.repository.get(&action.game_id).await?;
        let mut outbox = Outbox::new();

        match PhaseController::handle_action(&mut game, action, &mut outbox) {
            Ok(()) => {
                self.repository.save(&game).await?;
                self.dispatch(&game, outbox).await;
                Ok(game)
            }
            Err(err) => {
                self.dispatch(&game, outbox).await;
                Err(err.into())
            }
        }
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, AppError> {
        Ok(self.repository.get(game_id).await?)
    }

    pub async fn last_updated(&self, game_id: &str) -> Result<DateTime<Utc>, AppError> {
        Ok(self.repository.updated_at(game_id).await?)
    }

    /// The game as it stood after its first `index` actions
    pub async fn get_game_at(&self, game_id: &str, index: usize) -> Result<Game, AppError> {
        Ok(self.repository.get_at(game_id, index).await?)
    }

    /// Sends every notification at once; delivery order between players
    /// isn't guaranteed
    async fn dispatch(&self, game: &Game, outbox: Outbox) {
        if outbox.is_empty() {
            return;
        }
        let notifications = outbox.into_notifications();
        debug!(game_id = %game.id, count = notifications.len(), "Dispatching notifications");

        let interaction = self.interaction.as_ref();
        let deliveries = notifications.into_iter().map(|notification| async move {
            match notification {
                Notification::Blocking {
                    player_id,
                    blocker,
                    reason,
                } => {
                    interaction
                        .notify_blocking(&player_id, blocker, game, &reason)
                        .await
                }
                Notification::Message { player_id, text } => {
                    interaction.notify_message(&player_id, game, &text).await
                }
                Notification::ScoreUpdate { reasons } => {
                    interaction.notify_score_update(game, &reasons).await
                }
            }
        });
        join_all(deliveries).await;
    }
}
