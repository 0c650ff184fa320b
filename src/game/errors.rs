use thiserror::Error;

use super::cards::Card;
use super::model::{Blocker, Phase, PlayerId};

/// Broad classes of rejection, used to decide how a caller should react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The move was sent to the wrong place; nothing to re-issue
    Routing,
    /// The player isn't being waited on
    TurnOrder,
    /// The move was malformed for the blocker it claims to resolve
    Payload,
    /// A point claim disagreed with the scorer
    Scoring,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("Action is for game {action_game} but was sent to game {game}")]
    WrongGame { game: String, action_game: String },
    #[error("Player {0} is not in this game")]
    UnknownPlayer(PlayerId),
    #[error("The game is already over")]
    GameOver,
    #[error("Invalid game setup: {0}")]
    InvalidSetup(String),
    #[error("The game is not accepting moves during {0}")]
    PhaseNotActive(Phase),
    #[error("No cut card has been turned")]
    NoCutCard,
    #[error("Not waiting on player {0}")]
    NotBlocking(PlayerId),
    #[error("Expected a {expected} move, got {actual}")]
    WrongBlocker { expected: Blocker, actual: Blocker },
    #[error("Must shuffle between 1 and {max} times, got {0}", max = super::phases::MAX_SHUFFLES)]
    InvalidShuffleCount(u32),
    #[error("Expected {expected} cards, got {actual}")]
    WrongCardCount { expected: usize, actual: usize },
    #[error("Card {0} is not in your hand")]
    CardNotInHand(Card),
    #[error("Card {0} has already been played")]
    CardAlreadyPlayed(Card),
    #[error("Playing {card} would take the count past 31 (currently {count})")]
    OverThirtyOne { card: Card, count: u32 },
    #[error("Cannot say go while holding a playable card")]
    MustPlayCard,
    #[error("Cut must be between 0 and 1, got {0}")]
    InvalidCutFraction(f64),
    #[error("Not enough cards left in the deck")]
    DeckExhausted,
    #[error("Wrong number of points: claimed {claimed}")]
    WrongNumberOfPoints { claimed: u32 },
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::WrongGame { .. }
            | GameError::UnknownPlayer(_)
            | GameError::GameOver
            | GameError::InvalidSetup(_)
            | GameError::PhaseNotActive(_)
            | GameError::NoCutCard => ErrorKind::Routing,
            GameError::NotBlocking(_) => ErrorKind::TurnOrder,
            GameError::WrongBlocker { .. }
            | GameError::InvalidShuffleCount(_)
            | GameError::WrongCardCount { .. }
            | GameError::CardNotInHand(_)
            | GameError::CardAlreadyPlayed(_)
            | GameError::OverThirtyOne { .. }
            | GameError::MustPlayCard
            | GameError::InvalidCutFraction(_)
            | GameError::DeckExhausted => ErrorKind::Payload,
            GameError::WrongNumberOfPoints { .. } => ErrorKind::Scoring,
        }
    }
}
