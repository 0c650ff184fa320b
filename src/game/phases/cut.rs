use super::{award, wrong_blocker, PhaseHandler};
use crate::game::action::{ActionPayload, PlayerAction};
use crate::game::cards::Rank;
use crate::game::errors::GameError;
use crate::game::model::{Blocker, Game, Phase};
use crate::game::notify::Outbox;

/// Points the dealer earns when the cut card is a Jack
const HIS_HEELS: u32 = 2;

pub struct CutHandler;

impl PhaseHandler for CutHandler {
    fn start(&self, game: &mut Game, outbox: &mut Outbox) {
        let cutter = game.player_before(&game.current_dealer);
        game.block(&cutter, Blocker::CutCard);
        outbox.blocking(&cutter, Blocker::CutCard, "Cut the deck");
    }

    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let ActionPayload::CutCard { fraction } = action.payload else {
            return Err(wrong_blocker(Blocker::CutCard, action));
        };
        if !(0.0..=1.0).contains(&fraction) {
            return Err(GameError::InvalidCutFraction(fraction));
        }

        let card = game.deck.cut(fraction).ok_or(GameError::DeckExhausted)?;
        game.cut_card = Some(card);
        game.unblock(&action.player_id);
        outbox.broadcast(game, format!("The cut card is {}", card));

        if card.rank == Rank::Jack {
            let dealer = game.current_dealer.clone();
            award(
                game,
                outbox,
                &dealer,
                HIS_HEELS,
                vec![format!("{} for his heels", HIS_HEELS)],
            );
        }

        game.phase = Phase::PeggingReady;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cards::{Card, Deck};
    use crate::game::model::test_utils::game_with;
    use crate::game::model::PlayerColor;

    fn cut_game(deck: &str) -> Game {
        let mut game = game_with(&["alice", "bob", "carol"]);
        game.phase = Phase::Cut;
        game.deck = Deck::from_cards(
            deck.split_whitespace()
                .map(|s| Card::from_string(s).unwrap())
                .collect(),
        );
        CutHandler.start(&mut game, &mut Outbox::new());
        game
    }

    fn cut(game: &mut Game, fraction: f64) -> Result<(), GameError> {
        let action = PlayerAction::new(&game.id, "carol", ActionPayload::CutCard { fraction });
        CutHandler.handle_action(game, &action, &mut Outbox::new())
    }

    #[test]
    fn player_behind_the_dealer_cuts() {
        let game = cut_game("AS 2S 3S");
        // Alice deals, so Carol sits behind her
        assert_eq!(game.blocker_for("carol"), Some(Blocker::CutCard));
        assert_eq!(game.blocking_players.len(), 1);
    }

    #[test]
    fn cut_picks_card_by_fraction() {
        let mut game = cut_game("AS 2S 3S");
        cut(&mut game, 1.0).unwrap();

        assert_eq!(game.cut_card, Some(Card::from_string("3S").unwrap()));
        assert_eq!(game.phase, Phase::PeggingReady);
        assert!(game.blocking_players.is_empty());
    }

    #[test]
    fn jack_cut_pays_the_dealer() {
        let mut game = cut_game("JD 2S 3S");
        cut(&mut game, 0.0).unwrap();

        assert_eq!(game.score(PlayerColor::Blue), 2);
        assert_eq!(game.score(PlayerColor::Green), 0);
    }

    #[test]
    fn rejects_fraction_outside_unit_range() {
        let mut game = cut_game("AS 2S 3S");
        assert_eq!(cut(&mut game, 1.5), Err(GameError::InvalidCutFraction(1.5)));
        assert!(cut(&mut game, f64::NAN).is_err());
        assert_eq!(game.cut_card, None);
        assert_eq!(game.blocker_for("carol"), Some(Blocker::CutCard));
    }
}
