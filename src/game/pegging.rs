//! Pegging state derived by replaying the action log.
//!
//! Nothing here is stored on the game. The running count and "everyone has
//! passed" are recomputed from the pegged cards and the actions around them
//! on every call, so they can never drift from the log.

use super::action::PlayerAction;
use super::cards::Card;
use super::model::{PeggedCard, Player, CARDS_IN_PLAY};

/// The count can never pass this
pub const PEG_LIMIT: u32 = 31;

/// Cards laid since the count last reset, in play order
pub fn current_sequence(
    actions: &[PlayerAction],
    pegged: &[PeggedCard],
    players: &[Player],
) -> Vec<Card> {
    let mut sequence: Vec<Card> = Vec::new();

    for (i, pegged_card) in pegged.iter().enumerate() {
        if i > 0 && circuit_closed(actions, &pegged[..i], players, pegged_card.action_index) {
            sequence.clear();
        }

        sequence.push(pegged_card.card);
        if count_of(&sequence) == PEG_LIMIT {
            sequence.clear();
        }
    }

    if !pegged.is_empty() && circuit_closed(actions, pegged, players, actions.len()) {
        sequence.clear();
    }

    sequence
}

/// The running pegging count
pub fn current_peg(actions: &[PlayerAction], pegged: &[PeggedCard], players: &[Player]) -> u32 {
    count_of(&current_sequence(actions, pegged, players))
}

/// Whether the passes at the end of the log close a full circuit, which
/// resets the count and earns the last player to lay a card the go
pub fn has_everyone_passed(
    actions: &[PlayerAction],
    pegged: &[PeggedCard],
    players: &[Player],
) -> bool {
    !pegged.is_empty() && circuit_closed(actions, pegged, players, actions.len())
}

fn count_of(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.peg_value() as u32).sum()
}

/// Looks backward from `until` (exclusive) for consecutive passes made after
/// the last card in `played`. The circuit is closed once every player still
/// holding cards has passed, ending with whoever laid that card if they
/// still hold any.
fn circuit_closed(
    actions: &[PlayerAction],
    played: &[PeggedCard],
    players: &[Player],
    until: usize,
) -> bool {
    let Some(last) = played.last() else {
        return false;
    };
    let until = until.min(actions.len());
    if until <= last.action_index + 1 {
        return false;
    }

    let passes: Vec<&PlayerAction> = actions[last.action_index + 1..until]
        .iter()
        .rev()
        .take_while(|a| a.is_go())
        .collect();
    let Some(most_recent) = passes.first() else {
        return false;
    };

    let active: Vec<&Player> = players
        .iter()
        .filter(|p| played.iter().filter(|pc| pc.player_id == p.id).count() < CARDS_IN_PLAY)
        .collect();
    if active.is_empty() || passes.len() < active.len() {
        return false;
    }

    let last_player_active = active.iter().any(|p| p.id == last.player_id);
    !last_player_active || most_recent.player_id == last.player_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::ActionPayload;
    use crate::game::model::test_utils::players;

    /// Builds a pegging log from `(player, card-or-"go")` steps
    struct PegLog {
        actions: Vec<PlayerAction>,
        pegged: Vec<PeggedCard>,
    }

    impl PegLog {
        fn new() -> Self {
            Self {
                actions: Vec::new(),
                pegged: Vec::new(),
            }
        }

        fn play(mut self, player: &str, card: &str) -> Self {
            let card = Card::from_string(card).unwrap();
            self.pegged.push(PeggedCard {
                card,
                player_id: player.to_string(),
                action_index: self.actions.len(),
            });
            self.actions.push(PlayerAction::new(
                "game-1",
                player,
                ActionPayload::PegCard { card: Some(card) },
            ));
            self
        }

        fn go(mut self, player: &str) -> Self {
            self.actions.push(PlayerAction::new(
                "game-1",
                player,
                ActionPayload::PegCard { card: None },
            ));
            self
        }
    }

    #[test]
    fn count_accumulates_peg_values() {
        let table = players(&["alice", "bob"]);
        let log = PegLog::new().play("bob", "KS").play("alice", "5H");

        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 15);
    }

    #[test]
    fn count_resets_at_thirty_one() {
        let table = players(&["alice", "bob"]);
        let log = PegLog::new()
            .play("bob", "KS")
            .play("alice", "QH")
            .play("bob", "9D")
            .play("alice", "2C");

        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 0);

        let log = log.play("bob", "4S");
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 4);
    }

    #[test]
    fn two_player_circuit_needs_two_passes() {
        let table = players(&["alice", "bob"]);
        let log = PegLog::new()
            .play("bob", "KS")
            .play("alice", "QH")
            .play("bob", "9D")
            .go("alice");

        assert!(!has_everyone_passed(&log.actions, &log.pegged, &table));
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 29);

        let log = log.go("bob");
        assert!(has_everyone_passed(&log.actions, &log.pegged, &table));
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 0);

        let log = log.play("alice", "8C");
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 8);
        assert!(!has_everyone_passed(&log.actions, &log.pegged, &table));
    }

    #[test]
    fn four_player_circuit_needs_four_passes() {
        let table = players(&["a", "b", "c", "d"]);
        let log = PegLog::new()
            .play("b", "KS")
            .play("c", "QH")
            .play("d", "8D")
            .go("a")
            .go("b")
            .go("c");

        // Three passes with the last player to lay a card still silent
        assert!(!has_everyone_passed(&log.actions, &log.pegged, &table));
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 28);

        let log = log.go("d");
        assert!(has_everyone_passed(&log.actions, &log.pegged, &table));
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 0);
    }

    #[test]
    fn pass_then_play_keeps_the_count() {
        let table = players(&["a", "b", "c"]);
        let log = PegLog::new()
            .play("b", "KS")
            .play("c", "QH")
            .go("a")
            .play("b", "5D");

        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 25);
        assert_eq!(
            current_sequence(&log.actions, &log.pegged, &table).len(),
            3
        );
    }

    #[test]
    fn circuit_skips_players_out_of_cards() {
        let table = players(&["alice", "bob"]);
        // Alice lays her last card, so only Bob has to pass
        let log = PegLog::new()
            .play("bob", "KS")
            .play("alice", "AS")
            .play("bob", "KC")
            .play("alice", "AC")
            .go("bob")
            .play("alice", "AD")
            .go("bob")
            .play("alice", "AH");

        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 24);

        let log = log.go("bob");
        assert!(has_everyone_passed(&log.actions, &log.pegged, &table));
        assert_eq!(current_peg(&log.actions, &log.pegged, &table), 0);
    }

    #[test]
    fn empty_log_has_zero_count() {
        let table = players(&["alice", "bob"]);
        assert_eq!(current_peg(&[], &[], &table), 0);
        assert!(!has_everyone_passed(&[], &[], &table));
    }
}
