pub mod handlers;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::shared::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/games", post(handlers::create_game))
        .route("/games/:id", get(handlers::get_game))
        .route("/games/:id/summary", get(handlers::get_game_summary))
        .route("/games/:id/actions", post(handlers::submit_action))
        .route("/games/:id/actions/:index", get(handlers::get_game_at))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
