use super::{wrong_blocker, PhaseHandler};
use crate::game::action::{ActionPayload, PlayerAction};
use crate::game::errors::GameError;
use crate::game::model::{Blocker, Game, Phase, CRIB_SIZE};
use crate::game::notify::Outbox;

pub struct BuildCribHandler;

impl PhaseHandler for BuildCribHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let needed = game.crib_cards_per_player();
        let dealer_name = game.player_name(&game.current_dealer);
        let player_ids: Vec<String> = game.players.iter().map(|p| p.id.clone()).collect();

        for player_id in player_ids {
            game.block(&player_id, Blocker::CribCard);
            outbox.blocking(
                &player_id,
                Blocker::CribCard,
                format!("Toss {} card(s) into {}'s crib", needed, dealer_name),
            );
        }
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        _outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let ActionPayload::CribCard { cards } = &action.payload else {
            return Err(wrong_blocker(Blocker::CribCard, action));
        };

        let needed = game.crib_cards_per_player();
        if cards.len() != needed {
            return Err(GameError::WrongCardCount {
                expected: needed,
                actual: cards.len(),
            });
        }

        let mut kept = game.hand(&action.player_id).to_vec();
        for card in cards {
            let position = kept
                .iter()
                .position(|c| c == card)
                .ok_or(GameError::CardNotInHand(*card))?;
            kept.remove(position);
        }

        game.hands.insert(action.player_id.clone(), kept);
        game.crib.extend(cards.iter().copied());
        game.unblock(&action.player_id);

        if game.crib.len() == CRIB_SIZE {
            game.phase = Phase::CutReady;
        }
        Ok(())
    }
}
