use async_trait::async_trait;
use tracing::debug;

use crate::game::cards::Card;
use crate::game::pegging::{current_peg, current_sequence, PEG_LIMIT};
use crate::game::scoring::{peg_points, points};
use crate::game::{ActionPayload, Blocker, Game};

use super::toss::toss_stats;
use super::types::NpcStrategy;

/// Shuffles used when an NPC deals
pub const NPC_SHUFFLES: u32 = 7;

/// Plays sensibly without looking ahead: keeps the hand with the best
/// average value, pegs whatever scores most right now, and counts exactly.
pub struct SimpleNpc;

impl SimpleNpc {
    pub fn new() -> Self {
        Self
    }

    fn choose_toss(&self, game: &Game, player_id: &str) -> Option<Vec<Card>> {
        toss_stats(game.hand(player_id), game.crib_cards_per_player())
            .into_iter()
            .next()
            .map(|best| best.tossed)
    }

    /// The legal card scoring the most points, preferring to keep low cards
    /// for later. `None` means go.
    fn choose_peg(&self, game: &Game, player_id: &str) -> Option<Card> {
        let count = current_peg(&game.actions, &game.pegged_cards, &game.players);
        let sequence = current_sequence(&game.actions, &game.pegged_cards, &game.players);

        game.unplayed_cards(player_id)
            .into_iter()
            .filter(|card| count + card.peg_value() as u32 <= PEG_LIMIT)
            .max_by_key(|card| {
                let mut next = sequence.clone();
                next.push(*card);
                (peg_points(&next), card.peg_value())
            })
    }
}

impl Default for SimpleNpc {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NpcStrategy for SimpleNpc {
    async fn decide(
        &self,
        game: &Game,
        player_id: &str,
        blocker: Blocker,
    ) -> Option<ActionPayload> {
        let payload = match blocker {
            Blocker::DealCards => ActionPayload::DealCards {
                num_shuffles: NPC_SHUFFLES,
            },
            Blocker::CribCard => ActionPayload::CribCard {
                cards: self.choose_toss(game, player_id)?,
            },
            Blocker::CutCard => ActionPayload::CutCard { fraction: 0.5 },
            Blocker::PegCard => ActionPayload::PegCard {
                card: self.choose_peg(game, player_id),
            },
            Blocker::CountHand => ActionPayload::CountHand {
                points: points(game.cut_card?, game.hand(player_id), false),
            },
            Blocker::CountCrib => ActionPayload::CountCrib {
                points: points(game.cut_card?, &game.crib, true),
            },
        };

        debug!(
            game_id = %game.id,
            player_id = %player_id,
            payload = ?payload,
            "NPC decided"
        );
        Some(payload)
    }

    fn strategy_name(&self) -> &'static str {
        "SimpleNpc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::model::test_utils::game_with;
    use crate::game::{PeggedCard, Phase, PlayerAction};

    fn cards(notation: &str) -> Vec<Card> {
        notation
            .split_whitespace()
            .map(|s| Card::from_string(s).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn tosses_the_weakest_cards() {
        let mut game = game_with(&["alice", "bob"]);
        game.phase = Phase::BuildCrib;
        game.hands.insert("bob".into(), cards("5S 5C 5D JH KC 2D"));

        let payload = SimpleNpc.decide(&game, "bob", Blocker::CribCard).await;
        assert_eq!(
            payload,
            Some(ActionPayload::CribCard {
                cards: cards("KC 2D")
            })
        );
    }

    fn play(game: &mut Game, player: &str, card: &str) {
        let card = Card::from_string(card).unwrap();
        let index = game.actions.len();
        game.actions.push(PlayerAction::new(
            &game.id,
            player,
            ActionPayload::PegCard { card: Some(card) },
        ));
        game.pegged_cards.push(PeggedCard {
            card,
            player_id: player.into(),
            action_index: index,
        });
    }

    #[tokio::test]
    async fn pegs_for_points_and_goes_when_stuck() {
        let mut game = game_with(&["alice", "bob"]);
        game.phase = Phase::Pegging;
        game.hands.insert("alice".into(), cards("TS JS QS KS"));
        game.hands.insert("bob".into(), cards("5H 4C 2D AH"));
        play(&mut game, "alice", "TS");

        // 10 on the table, so the five makes fifteen
        assert_eq!(
            SimpleNpc.decide(&game, "bob", Blocker::PegCard).await,
            Some(ActionPayload::PegCard {
                card: Some(Card::from_string("5H").unwrap())
            })
        );

        play(&mut game, "bob", "5H");
        play(&mut game, "alice", "JS");
        // Nothing scores at 25, so the highest card goes first
        assert_eq!(
            SimpleNpc.decide(&game, "bob", Blocker::PegCard).await,
            Some(ActionPayload::PegCard {
                card: Some(Card::from_string("4C").unwrap())
            })
        );
        assert_eq!(
            SimpleNpc.decide(&game, "alice", Blocker::PegCard).await,
            Some(ActionPayload::PegCard { card: None })
        );
    }

    #[tokio::test]
    async fn counts_exactly_and_waits_for_the_cut() {
        let mut game = game_with(&["alice", "bob"]);
        game.hands.insert("bob".into(), cards("5S 5C 5D JH"));

        assert_eq!(SimpleNpc.decide(&game, "bob", Blocker::CountHand).await, None);

        game.cut_card = Some(Card::from_string("5H").unwrap());
        assert_eq!(
            SimpleNpc.decide(&game, "bob", Blocker::CountHand).await,
            Some(ActionPayload::CountHand { points: 29 })
        );
    }
}
