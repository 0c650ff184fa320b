use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use cribbage::game::{
    Blocker, Game, GameRepository, InMemoryGameRepository, Notification, PlayerInteraction,
    RepositoryError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Remembers every notification it is asked to deliver
#[derive(Clone, Default)]
pub struct RecordingInteraction {
    delivered: Arc<RwLock<Vec<Notification>>>,
}

#[allow(dead_code)] // Not every test file inspects every kind of notification
impl RecordingInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.delivered.read().await.clone()
    }

    /// Blocking notifications sent to `player_id`, oldest first
    pub async fn blockers_for(&self, player_id: &str) -> Vec<(Blocker, String)> {
        self.delivered
            .read()
            .await
            .iter()
            .filter_map(|n| match n {
                Notification::Blocking {
                    player_id: to,
                    blocker,
                    reason,
                } if to == player_id => Some((*blocker, reason.clone())),
                _ => None,
            })
            .collect()
    }

    pub async fn messages_for(&self, player_id: &str) -> Vec<String> {
        self.delivered
            .read()
            .await
            .iter()
            .filter_map(|n| match n {
                Notification::Message { player_id: to, text } if to == player_id => {
                    Some(text.clone())
                }
                _ => None,
            })
            .collect()
    }

    pub async fn score_reasons(&self) -> Vec<String> {
        self.delivered
            .read()
            .await
            .iter()
            .filter_map(|n| match n {
                Notification::ScoreUpdate { reasons } => Some(reasons.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub async fn clear(&self) {
        self.delivered.write().await.clear();
    }
}

#[async_trait]
impl PlayerInteraction for RecordingInteraction {
    async fn notify_blocking(&self, player_id: &str, blocker: Blocker, _game: &Game, reason: &str) {
        self.delivered.write().await.push(Notification::Blocking {
            player_id: player_id.to_string(),
            blocker,
            reason: reason.to_string(),
        });
    }

    async fn notify_message(&self, player_id: &str, _game: &Game, text: &str) {
        self.delivered.write().await.push(Notification::Message {
            player_id: player_id.to_string(),
            text: text.to_string(),
        });
    }

    async fn notify_score_update(&self, _game: &Game, reasons: &[String]) {
        self.delivered.write().await.push(Notification::ScoreUpdate {
            reasons: reasons.to_vec(),
        });
    }
}

/// In-memory storage whose first few saves lose a race to some other writer
#[derive(Default)]
pub struct ConflictingRepository {
    inner: InMemoryGameRepository,
    conflicts_left: AtomicUsize,
    conflicts_raised: AtomicUsize,
}

#[allow(dead_code)]
impl ConflictingRepository {
    pub fn new(conflicts: usize) -> Self {
        Self {
            inner: InMemoryGameRepository::new(),
            conflicts_left: AtomicUsize::new(conflicts),
            conflicts_raised: AtomicUsize::new(0),
        }
    }

    pub fn conflicts_raised(&self) -> usize {
        self.conflicts_raised.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameRepository for ConflictingRepository {
    async fn create(&self, game: &Game) -> Result<(), RepositoryError> {
        self.inner.create(game).await
    }

    async fn save(&self, game: &Game) -> Result<(), RepositoryError> {
        let conflict = self
            .conflicts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if conflict {
            self.conflicts_raised.fetch_add(1, Ordering::SeqCst);
            let saved = self.inner.get(&game.id).await?.actions.len();
            return Err(RepositoryError::OutOfOrder {
                game_id: game.id.clone(),
                saved,
                submitted: game.actions.len(),
            });
        }
        self.inner.save(game).await
    }

    async fn get(&self, game_id: &str) -> Result<Game, RepositoryError> {
        self.inner.get(game_id).await
    }

    async fn get_at(&self, game_id: &str, index: usize) -> Result<Game, RepositoryError> {
        self.inner.get_at(game_id, index).await
    }

    async fn updated_at(&self, game_id: &str) -> Result<DateTime<Utc>, RepositoryError> {
        self.inner.updated_at(game_id).await
    }
}
