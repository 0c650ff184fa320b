use tracing::info;

use super::{award, wrong_blocker, PhaseHandler};
use crate::game::action::{ActionPayload, PlayerAction};
use crate::game::cards::cards_to_string;
use crate::game::errors::GameError;
use crate::game::model::{Blocker, Game, Phase};
use crate::game::notify::Outbox;
use crate::game::scoring::points;

/// Each player counts their hand, starting left of the dealer and ending
/// with the dealer.
pub struct CountHandHandler;

impl PhaseHandler for CountHandHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let first = game.player_after(&game.current_dealer);
        block_counter(game, outbox, &first);
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let ActionPayload::CountHand { points: claimed } = action.payload else {
            return Err(wrong_blocker(Blocker::CountHand, action));
        };
        let cut = game.cut_card.ok_or(GameError::NoCutCard)?;
        let actual = points(cut, game.hand(&action.player_id), false);
        if claimed != actual {
            return Err(GameError::WrongNumberOfPoints { claimed });
        }

        award(
            game,
            outbox,
            &action.player_id,
            actual,
            vec![format!("{} for their hand", actual)],
        );
        game.unblock(&action.player_id);

        if action.player_id == game.current_dealer {
            game.phase = Phase::CribCountingReady;
        } else {
            let next = game.player_after(&action.player_id);
            block_counter(game, outbox, &next);
        }
        Ok(())
    }
}

fn block_counter(game: &mut Game, outbox: &mut Outbox, player_id: &str) {
    game.block(player_id, Blocker::CountHand);
    let reason = match game.cut_card {
        Some(cut) => format!(
            "Count your hand: {} with {} cut",
            cards_to_string(game.hand(player_id)),
            cut
        ),
        None => "Count your hand".to_string(),
    };
    outbox.blocking(player_id, Blocker::CountHand, reason);
}

/// The dealer counts the crib, which closes out the round.
pub struct CountCribHandler;

impl PhaseHandler for CountCribHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let dealer = game.current_dealer.clone();
        game.block(&dealer, Blocker::CountCrib);
        let reason = match game.cut_card {
            Some(cut) => format!(
                "Count your crib: {} with {} cut",
                cards_to_string(&game.crib),
                cut
            ),
            None => "Count your crib".to_string(),
        };
        outbox.blocking(&dealer, Blocker::CountCrib, reason);
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let ActionPayload::CountCrib { points: claimed } = action.payload else {
            return Err(wrong_blocker(Blocker::CountCrib, action));
        };
        let cut = game.cut_card.ok_or(GameError::NoCutCard)?;
        let actual = points(cut, &game.crib, true);
        if claimed != actual {
            return Err(GameError::WrongNumberOfPoints { claimed });
        }

        award(
            game,
            outbox,
            &action.player_id,
            actual,
            vec![format!("{} for the crib", actual)],
        );
        game.unblock(&action.player_id);
        end_round(game, outbox);
        Ok(())
    }
}

/// Clears the table and passes the deal to the left
fn end_round(game: &mut Game, outbox: &mut Outbox) {
    let next_dealer = game.player_after(&game.current_dealer);
    game.current_dealer = next_dealer.clone();
    game.hands.clear();
    game.crib.clear();
    game.cut_card = None;
    game.pegged_cards.clear();
    game.deck = Default::default();
    game.phase = Phase::DealingReady;

    info!(game_id = %game.id, dealer = %next_dealer, "Round finished");
    outbox.broadcast(game, format!("{} deals next", game.player_name(&next_dealer)));
}
