// Library crate for the Cribbage game server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod game;
pub mod http;
pub mod npc;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use event::{EventBus, EventBusInteraction, GameEvent, GameSubscription};
pub use game::{GameService, PhaseController};
pub use npc::{NpcRegistry, NpcSubscriber};
pub use shared::{AppError, AppState};
