use std::sync::Arc;

use cribbage::game::{Game, GameService, InMemoryGameRepository, NewPlayer};

use super::mocks::RecordingInteraction;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub service: Arc<GameService>,
    pub repository: Arc<InMemoryGameRepository>,
    pub interaction: RecordingInteraction,
    pub game: Game,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    game_id: String,
    deck_seed: u64,
}

#[allow(dead_code)]
impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            game_id: "game-123".to_string(),
            deck_seed: 2024,
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["alice", "bob"])
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "charlie"])
    }

    pub fn with_four_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "charlie", "david"])
    }

    pub fn with_seed(mut self, deck_seed: u64) -> Self {
        self.deck_seed = deck_seed;
        self
    }

    pub async fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryGameRepository::new());
        let interaction = RecordingInteraction::new();
        let service = Arc::new(GameService::new(
            repository.clone(),
            Arc::new(interaction.clone()),
        ));

        let players: Vec<NewPlayer> = self
            .players
            .iter()
            .map(|id| NewPlayer::new(id, &capitalize(id)))
            .collect();
        let game = service
            .create_game_with_seed(&self.game_id, &players, self.deck_seed)
            .await
            .unwrap();

        TestSetup {
            service,
            repository,
            interaction,
            game,
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
