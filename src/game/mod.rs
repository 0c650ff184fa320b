// Public API
pub use action::{ActionPayload, PlayerAction};
pub use cards::{Card, Deck, Rank, Suit};
pub use controller::PhaseController;
pub use errors::{ErrorKind, GameError};
pub use model::{
    Blocker, Game, NewPlayer, PeggedCard, Phase, Player, PlayerColor, PlayerId, WINNING_SCORE,
};
pub use notify::{LoggingInteraction, Notification, Outbox, PlayerInteraction};
pub use repository::{GameRepository, InMemoryGameRepository, RepositoryError};
pub use service::GameService;

pub mod action;
pub mod cards;
pub mod controller;
pub mod errors;
pub mod model;
pub mod notify;
pub mod pegging;
pub mod phases;
pub mod repository;
pub mod scoring;
mod service;
