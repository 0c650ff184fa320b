use cribbage::game::pegging::{current_peg, PEG_LIMIT};
use cribbage::game::scoring::points;
use cribbage::game::{ActionPayload, Blocker, Game, Phase, PlayerAction};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

/// The first blocked player in seat order and a legal move for them
pub fn legal_move(game: &Game) -> PlayerAction {
    let (player_id, blocker) = game
        .players
        .iter()
        .find_map(|p| game.blocker_for(&p.id).map(|b| (p.id.clone(), b)))
        .expect("someone should be blocking");

    let payload = match blocker {
        Blocker::DealCards => ActionPayload::DealCards { num_shuffles: 5 },
        Blocker::CribCard => ActionPayload::CribCard {
            cards: game.hand(&player_id)[..game.crib_cards_per_player()].to_vec(),
        },
        Blocker::CutCard => ActionPayload::CutCard { fraction: 0.25 },
        Blocker::PegCard => {
            let count = current_peg(&game.actions, &game.pegged_cards, &game.players);
            ActionPayload::PegCard {
                card: game
                    .unplayed_cards(&player_id)
                    .into_iter()
                    .find(|c| count + c.peg_value() as u32 <= PEG_LIMIT),
            }
        }
        Blocker::CountHand => ActionPayload::CountHand {
            points: points(game.cut_card.unwrap(), game.hand(&player_id), false),
        },
        Blocker::CountCrib => ActionPayload::CountCrib {
            points: points(game.cut_card.unwrap(), &game.crib, true),
        },
    };
    PlayerAction::new(&game.id, &player_id, payload)
}

#[allow(dead_code)]
impl TestSetup {
    /// Plays one legal move through the service
    pub async fn step(&mut self) -> &Game {
        let action = legal_move(&self.game);
        self.game = self.service.handle_action(action).await.unwrap();
        &self.game
    }

    /// Plays legal moves until someone owes `blocker`
    pub async fn play_until_blocker(&mut self, blocker: Blocker) {
        for _ in 0..200 {
            if self.game.blocking_players.values().any(|b| *b == blocker) {
                return;
            }
            self.step().await;
        }
        panic!("never reached {}", blocker);
    }

    /// Plays legal moves until the next deal is due
    pub async fn play_round(&mut self) {
        for _ in 0..200 {
            self.step().await;
            if self.game.phase == Phase::Deal {
                return;
            }
        }
        panic!("round never finished");
    }
}
