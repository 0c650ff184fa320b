use tracing::debug;

use super::{wrong_blocker, PhaseHandler, MAX_SHUFFLES};
use crate::game::action::{ActionPayload, PlayerAction};
use crate::game::cards::{cards_to_string, Deck};
use crate::game::errors::GameError;
use crate::game::model::{Blocker, Game, Phase};
use crate::game::notify::Outbox;

pub struct DealHandler;

impl PhaseHandler for DealHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let dealer = game.current_dealer.clone();
        game.block(&dealer, Blocker::DealCards);
        outbox.blocking(&dealer, Blocker::DealCards, "It's your deal, shuffle the cards");
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let ActionPayload::DealCards { num_shuffles } = action.payload else {
            return Err(wrong_blocker(Blocker::DealCards, action));
        };
        if !(1..=MAX_SHUFFLES).contains(&num_shuffles) {
            return Err(GameError::InvalidShuffleCount(num_shuffles));
        }

        // The shuffle is keyed to where this deal sits in the log
        let salt = game.actions.len().saturating_sub(1) as u64;
        let mut deck = Deck::shuffled(game.deck_seed, salt, num_shuffles);
        let hand_size = game.hand_size();
        let dealer = game.current_dealer.clone();

        game.crib.clear();
        game.hands.clear();
        game.pegged_cards.clear();
        game.cut_card = None;

        for player_id in game.players_after(&dealer) {
            let mut hand = deck.deal(hand_size);
            if hand.len() < hand_size {
                return Err(GameError::DeckExhausted);
            }
            hand.sort();
            game.hands.insert(player_id, hand);
        }
        // Three players leave one card short of a full crib
        if game.players.len() == 3 {
            game.crib.extend(deck.deal(1));
        }
        game.deck = deck;

        debug!(
            game_id = %game.id,
            dealer = %dealer,
            shuffles = num_shuffles,
            "Cards dealt"
        );

        game.unblock(&dealer);
        game.phase = Phase::BuildCribReady;

        for player in &game.players {
            outbox.message(
                &player.id,
                format!("Your hand: {}", cards_to_string(game.hand(&player.id))),
            );
        }
        Ok(())
    }
}
