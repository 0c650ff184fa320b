use cribbage::{
    game::InMemoryGameRepository, http, AppConfig, AppState, EventBus, EventBusInteraction,
    GameService, NpcRegistry,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cribbage=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        event_capacity = config.event_capacity,
        npc_delay_ms = config.npc_delay.as_millis() as u64,
        "Starting Cribbage game server"
    );

    let event_bus = EventBus::new(config.event_capacity);
    let game_service = Arc::new(GameService::new(
        Arc::new(InMemoryGameRepository::new()),
        Arc::new(EventBusInteraction::new(event_bus.clone())),
    ));
    let app_state = AppState::new(
        game_service,
        event_bus,
        Arc::new(NpcRegistry::new()),
        config.clone(),
    );

    let app = http::router(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
