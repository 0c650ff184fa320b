use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::types::{CreateGameRequest, GameSummary};
use crate::event::GameSubscription;
use crate::game::{controller::MAX_PLAYERS, Game, PlayerAction};
use crate::npc::NpcSubscriber;
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new game
///
/// POST /games
/// Seats the requested players, adds any NPCs and returns the new game
#[instrument(
    name = "create_game",
    skip(state, request),
    fields(players = request.players.len(), npcs = request.npcs)
)]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<Game>, AppError> {
    let CreateGameRequest {
        mut players,
        npcs,
        deck_seed,
    } = request;
    if players.len() + npcs > MAX_PLAYERS {
        return Err(AppError::BadRequest(format!(
            "At most {} players can sit at a table",
            MAX_PLAYERS
        )));
    }

    let game_id = Uuid::new_v4().to_string();
    let mut npc_ids = Vec::with_capacity(npcs);
    if npcs > 0 {
        for _ in 0..npcs {
            let npc = state.npc_registry.create_npc().await;
            npc_ids.push(npc.id.clone());
            players.push(npc.seat());
        }

        // Subscribe before the game exists so the first blocker isn't missed
        let subscriber = NpcSubscriber::new(
            Arc::clone(&state.npc_registry),
            Arc::clone(&state.game_service),
            state.event_bus.clone(),
            state.config.npc_delay,
        );
        GameSubscription::new(game_id.clone(), Arc::new(subscriber), state.event_bus.clone())
            .start()
            .await;
    }

    let deck_seed = deck_seed.unwrap_or_else(rand::random);
    let game = match state
        .game_service
        .create_game_with_seed(&game_id, &players, deck_seed)
        .await
    {
        Ok(game) => game,
        Err(err) => {
            state.release_game(&game_id, &npc_ids).await;
            return Err(err);
        }
    };

    info!(game_id = %game.id, "Game created successfully");
    Ok(Json(game))
}

/// HTTP handler for fetching a game
///
/// GET /games/:id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<Game>, AppError> {
    let game = state.game_service.get_game(&game_id).await?;
    Ok(Json(game))
}

/// HTTP handler for a short status of a game
///
/// GET /games/:id/summary
#[instrument(name = "get_game_summary", skip(state))]
pub async fn get_game_summary(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameSummary>, AppError> {
    let game = state.game_service.get_game(&game_id).await?;
    let updated_at = state.game_service.last_updated(&game_id).await?;
    Ok(Json(GameSummary::new(&game, updated_at)))
}

/// HTTP handler for a game's history
///
/// GET /games/:id/actions/:index
/// Returns the game as it stood after its first `index` actions
#[instrument(name = "get_game_at", skip(state))]
pub async fn get_game_at(
    State(state): State<AppState>,
    Path((game_id, index)): Path<(String, usize)>,
) -> Result<Json<Game>, AppError> {
    let game = state.game_service.get_game_at(&game_id, index).await?;
    Ok(Json(game))
}

/// HTTP handler for submitting a move
///
/// POST /games/:id/actions
/// Returns the game after the move, or the reason it was refused
#[instrument(name = "submit_action", skip(state, action), fields(player_id = %action.player_id))]
pub async fn submit_action(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(action): Json<PlayerAction>,
) -> Result<Json<Game>, AppError> {
    if action.game_id != game_id {
        return Err(AppError::BadRequest(format!(
            "Action is for game {} but was posted to {}",
            action.game_id, game_id
        )));
    }

    let game = state.game_service.handle_action(action).await?;
    info!(game_id = %game.id, phase = %game.phase, "Move accepted");

    if game.is_over() {
        let player_ids: Vec<String> = game.players.iter().map(|p| p.id.clone()).collect();
        state.release_game(&game.id, &player_ids).await;
    }
    Ok(Json(game))
}
