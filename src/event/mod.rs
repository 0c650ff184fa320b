// In-process event distribution
//
// Every game gets its own broadcast channel. Notifications produced by the
// rules engine are published here and picked up by subscribers such as the
// automated players.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::GameEvent;
pub use handler::{EventError, GameEventHandler};
pub use interaction::EventBusInteraction;
pub use subscription::GameSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod interaction;
mod subscription;
