use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::model::{Blocker, Game, PlayerId};

/// Something a player needs to hear about after a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// The player owes the game a move
    Blocking {
        player_id: PlayerId,
        blocker: Blocker,
        reason: String,
    },
    Message {
        player_id: PlayerId,
        text: String,
    },
    /// Points were awarded; goes to everyone at the table
    ScoreUpdate { reasons: Vec<String> },
}

/// Notifications collected while a move is applied. The phase handlers only
/// write here; delivery happens afterwards, outside the rules engine.
#[derive(Debug, Default)]
pub struct Outbox {
    notifications: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocking(&mut self, player_id: &str, blocker: Blocker, reason: impl Into<String>) {
        self.notifications.push(Notification::Blocking {
            player_id: player_id.to_string(),
            blocker,
            reason: reason.into(),
        });
    }

    pub fn message(&mut self, player_id: &str, text: impl Into<String>) {
        self.notifications.push(Notification::Message {
            player_id: player_id.to_string(),
            text: text.into(),
        });
    }

    /// Sends the same message to every player in `game`
    pub fn broadcast(&mut self, game: &Game, text: impl Into<String>) {
        let text = text.into();
        for player in &game.players {
            self.message(&player.id, text.clone());
        }
    }

    pub fn score_update(&mut self, reasons: Vec<String>) {
        if !reasons.is_empty() {
            self.notifications.push(Notification::ScoreUpdate { reasons });
        }
    }

    /// Moves everything from `other` onto the end of this outbox
    pub fn append(&mut self, other: Outbox) {
        self.notifications.extend(other.notifications);
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn into_notifications(self) -> Vec<Notification> {
        self.notifications
    }
}

/// How the engine reaches players. Implementations may talk to a remote
/// client or drive an automated player; delivery is best effort and never
/// feeds back into game state.
#[async_trait]
pub trait PlayerInteraction: Send + Sync {
    async fn notify_blocking(&self, player_id: &str, blocker: Blocker, game: &Game, reason: &str);

    async fn notify_message(&self, player_id: &str, game: &Game, text: &str);

    async fn notify_score_update(&self, game: &Game, reasons: &[String]);
}

/// Writes every notification to the log and nothing else
pub struct LoggingInteraction;

#[async_trait]
impl PlayerInteraction for LoggingInteraction {
    async fn notify_blocking(&self, player_id: &str, blocker: Blocker, game: &Game, reason: &str) {
        info!(
            game_id = %game.id,
            player_id = %player_id,
            blocker = %blocker,
            reason = %reason,
            "Waiting on player"
        );
    }

    async fn notify_message(&self, player_id: &str, game: &Game, text: &str) {
        info!(game_id = %game.id, player_id = %player_id, text = %text, "Message");
    }

    async fn notify_score_update(&self, game: &Game, reasons: &[String]) {
        info!(
            game_id = %game.id,
            reasons = ?reasons,
            scores = ?game.current_scores,
            "Score update"
        );
    }
}
