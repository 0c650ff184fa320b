use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::event::EventBus;
use crate::game::{ErrorKind, GameError, GameService, RepositoryError};
use crate::npc::NpcRegistry;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub event_bus: EventBus,
    pub npc_registry: Arc<NpcRegistry>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        game_service: Arc<GameService>,
        event_bus: EventBus,
        npc_registry: Arc<NpcRegistry>,
        config: AppConfig,
    ) -> Self {
        Self {
            game_service,
            event_bus,
            npc_registry,
            config,
        }
    }

    pub async fn release_game(&self, game_id: &str, player_ids: &[String]) {
        release_game(&self.event_bus, &self.npc_registry, game_id, player_ids).await;
    }
}

/// Frees what a game holds outside the repository. Closing its channel ends
/// every subscription to it, and its NPCs are forgotten.
pub async fn release_game(
    event_bus: &EventBus,
    npc_registry: &NpcRegistry,
    game_id: &str,
    player_ids: &[String],
) {
    for player_id in player_ids {
        npc_registry.remove(player_id).await;
    }
    event_bus.close(game_id).await;
    info!(game_id = %game_id, "Released game");
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Internal server error")]
    Internal,
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) | RepositoryError::IndexOutOfRange { .. } => {
                AppError::NotFound(err.to_string())
            }
            RepositoryError::AlreadyExists(_) | RepositoryError::OutOfOrder { .. } => {
                AppError::Conflict(err.to_string())
            }
            RepositoryError::Replay { .. } => {
                error!(error = %err, "Stored game could not be replayed");
                AppError::Internal
            }
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Game(err) => match (err.kind(), err) {
                (ErrorKind::Routing, GameError::UnknownPlayer(_))
                | (ErrorKind::Routing, GameError::WrongGame { .. })
                | (ErrorKind::Routing, GameError::InvalidSetup(_)) => StatusCode::BAD_REQUEST,
                (ErrorKind::Routing, _) | (ErrorKind::TurnOrder, _) => StatusCode::CONFLICT,
                (ErrorKind::Payload, _) | (ErrorKind::Scoring, _) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
            },
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
