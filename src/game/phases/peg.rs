use tracing::debug;

use super::{award, wrong_blocker, PhaseHandler};
use crate::game::action::PlayerAction;
use crate::game::cards::Card;
use crate::game::errors::GameError;
use crate::game::model::{Blocker, Game, PeggedCard, Phase, CARDS_IN_PLAY};
use crate::game::notify::Outbox;
use crate::game::pegging::{current_peg, current_sequence, has_everyone_passed, PEG_LIMIT};
use crate::game::scoring::{peg_categories, PegCategory};

pub struct PeggingHandler;

impl PhaseHandler for PeggingHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let dealer = game.current_dealer.clone();
        block_next_pegger(game, outbox, &dealer);
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        if action.overcomes() != Blocker::PegCard {
            return Err(wrong_blocker(Blocker::PegCard, action));
        }
        // The controller has already logged this action
        let index = game.actions.len().saturating_sub(1);
        let player_id = action.player_id.clone();

        match action.pegged_card() {
            Some(card) => play_card(game, outbox, &player_id, card, index)?,
            None => say_go(game, outbox, &player_id, index)?,
        }

        game.unblock(&player_id);
        if game.pegged_cards.len() >= game.players.len() * CARDS_IN_PLAY {
            game.phase = Phase::CountingReady;
        } else {
            block_next_pegger(game, outbox, &player_id);
        }
        Ok(())
    }
}

fn play_card(
    game: &mut Game,
    outbox: &mut Outbox,
    player_id: &str,
    card: Card,
    index: usize,
) -> Result<(), GameError> {
    if !game.hand(player_id).contains(&card) {
        return Err(GameError::CardNotInHand(card));
    }
    if game.has_pegged(&card) {
        return Err(GameError::CardAlreadyPlayed(card));
    }

    let prior = &game.actions[..index];
    let count = current_peg(prior, &game.pegged_cards, &game.players);
    if count + card.peg_value() as u32 > PEG_LIMIT {
        return Err(GameError::OverThirtyOne { card, count });
    }

    let mut sequence = current_sequence(prior, &game.pegged_cards, &game.players);
    sequence.push(card);
    game.pegged_cards.push(PeggedCard {
        card,
        player_id: player_id.to_string(),
        action_index: index,
    });

    let mut scored = peg_categories(&sequence);
    let round_over = game.pegged_cards.len() == game.players.len() * CARDS_IN_PLAY;
    if round_over && !scored.contains(&PegCategory::ThirtyOne) {
        scored.push(PegCategory::LastCard);
    }

    debug!(
        game_id = %game.id,
        player_id = %player_id,
        card = %card,
        count = count + card.peg_value() as u32,
        "Card pegged"
    );
    outbox.broadcast(game, format!("{} played {}", game.player_name(player_id), card));
    award_categories(game, outbox, player_id, &scored);
    Ok(())
}

fn say_go(
    game: &mut Game,
    outbox: &mut Outbox,
    player_id: &str,
    index: usize,
) -> Result<(), GameError> {
    let count = current_peg(&game.actions[..index], &game.pegged_cards, &game.players);
    let can_play = game
        .unplayed_cards(player_id)
        .iter()
        .any(|c| count + c.peg_value() as u32 <= PEG_LIMIT);
    if can_play {
        return Err(GameError::MustPlayCard);
    }

    outbox.broadcast(game, format!("{} says go", game.player_name(player_id)));

    if has_everyone_passed(&game.actions, &game.pegged_cards, &game.players) {
        if let Some(last) = game.pegged_cards.last() {
            let scorer = last.player_id.clone();
            award_categories(game, outbox, &scorer, &[PegCategory::Go]);
        }
    }
    Ok(())
}

fn award_categories(game: &mut Game, outbox: &mut Outbox, player_id: &str, scored: &[PegCategory]) {
    let points = scored.iter().map(|c| c.points()).sum();
    let reasons = scored
        .iter()
        .map(|c| format!("{} for {}", c.points(), c))
        .collect();
    award(game, outbox, player_id, points, reasons);
}

/// Blocks the first player left of `after` who still holds an unplayed card
fn block_next_pegger(game: &mut Game, outbox: &mut Outbox, after: &str) {
    let next = game
        .players_after(after)
        .into_iter()
        .find(|id| !game.unplayed_cards(id).is_empty());
    let Some(next) = next else {
        return;
    };

    let count = current_peg(&game.actions, &game.pegged_cards, &game.players);
    game.block(&next, Blocker::PegCard);
    outbox.blocking(
        &next,
        Blocker::PegCard,
        format!("Play a card, the count is {}", count),
    );
}
