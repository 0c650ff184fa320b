use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::controller::PhaseController;
use super::errors::GameError;
use super::model::Game;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    #[error("Game {0} already exists")]
    AlreadyExists(String),
    #[error("Game {0} not found")]
    NotFound(String),
    /// The submitted log doesn't extend the saved one. Someone else moved
    /// first; reload and try again.
    #[error("Game {game_id} was updated concurrently ({saved} actions saved, {submitted} submitted)")]
    OutOfOrder {
        game_id: String,
        saved: usize,
        submitted: usize,
    },
    #[error("Game {game_id} has {len} actions, no state after {index}")]
    IndexOutOfRange {
        game_id: String,
        index: usize,
        len: usize,
    },
    #[error("Could not replay game {game_id}: {source}")]
    Replay { game_id: String, source: GameError },
}

/// Durable home for games.
///
/// `save` is the concurrency guard: the action log it receives must start
/// with exactly the log that was last saved for the game. Two callers who
/// loaded the same state and both applied a move can't both win.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Stores a game that hasn't received any moves yet
    async fn create(&self, game: &Game) -> Result<(), RepositoryError>;

    async fn save(&self, game: &Game) -> Result<(), RepositoryError>;

    async fn get(&self, game_id: &str) -> Result<Game, RepositoryError>;

    /// The game as it stood after its first `index` actions
    async fn get_at(&self, game_id: &str, index: usize) -> Result<Game, RepositoryError>;

    /// When the game was last written
    async fn updated_at(&self, game_id: &str) -> Result<DateTime<Utc>, RepositoryError>;
}

#[derive(Debug, Clone)]
struct StoredGame {
    pristine: Game,
    latest: Game,
    updated_at: DateTime<Utc>,
}

/// Keeps every game in memory. Earlier states are rebuilt from the
/// pristine game and the saved log on request.
#[derive(Default)]
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, StoredGame>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    async fn create(&self, game: &Game) -> Result<(), RepositoryError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game.id) {
            warn!("Game already exists in memory");
            return Err(RepositoryError::AlreadyExists(game.id.clone()));
        }

        games.insert(
            game.id.clone(),
            StoredGame {
                pristine: game.clone(),
                latest: game.clone(),
                updated_at: Utc::now(),
            },
        );
        debug!("Game created in memory");
        Ok(())
    }

    #[instrument(skip(self, game), fields(game_id = %game.id, actions = game.actions.len()))]
    async fn save(&self, game: &Game) -> Result<(), RepositoryError> {
        let mut games = self.games.write().await;
        let stored = games
            .get_mut(&game.id)
            .ok_or_else(|| RepositoryError::NotFound(game.id.clone()))?;

        let saved = &stored.latest.actions;
        let extends = game.actions.len() >= saved.len() && game.actions[..saved.len()] == saved[..];
        if !extends {
            warn!(saved = saved.len(), "Rejected out-of-order save");
            return Err(RepositoryError::OutOfOrder {
                game_id: game.id.clone(),
                saved: saved.len(),
                submitted: game.actions.len(),
            });
        }

        stored.latest = game.clone();
        stored.updated_at = Utc::now();
        debug!("Game saved in memory");
        Ok(())
    }

    async fn get(&self, game_id: &str) -> Result<Game, RepositoryError> {
        let games = self.games.read().await;
        games
            .get(game_id)
            .map(|stored| stored.latest.clone())
            .ok_or_else(|| RepositoryError::NotFound(game_id.to_string()))
    }

    async fn updated_at(&self, game_id: &str) -> Result<DateTime<Utc>, RepositoryError> {
        let games = self.games.read().await;
        games
            .get(game_id)
            .map(|stored| stored.updated_at)
            .ok_or_else(|| RepositoryError::NotFound(game_id.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_at(&self, game_id: &str, index: usize) -> Result<Game, RepositoryError> {
        let (pristine, actions) = {
            let games = self.games.read().await;
            let stored = games
                .get(game_id)
                .ok_or_else(|| RepositoryError::NotFound(game_id.to_string()))?;
            let len = stored.latest.actions.len();
            if index > len {
                return Err(RepositoryError::IndexOutOfRange {
                    game_id: game_id.to_string(),
                    index,
                    len,
                });
            }
            (
                stored.pristine.clone(),
                stored.latest.actions[..index].to_vec(),
            )
        };

        debug!(actions = actions.len(), "Replaying game");
        PhaseController::rebuild(&pristine, &actions).map_err(|source| RepositoryError::Replay {
            game_id: game_id.to_string(),
            source,
        })
    }
}
