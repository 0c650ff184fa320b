//! One handler per phase pair. A handler's `start` runs during the "ready"
//! phase in front of it and hands out blockers; `handle_action` validates
//! and applies a move made during the playing phase.

use super::action::PlayerAction;
use super::errors::GameError;
use super::model::{Blocker, Game, Phase};
use super::notify::Outbox;

mod counting;
mod crib;
mod cut;
mod deal;
mod peg;

pub use counting::{CountCribHandler, CountHandHandler};
pub use crib::BuildCribHandler;
pub use cut::CutHandler;
pub use deal::DealHandler;
pub use peg::PeggingHandler;

/// Upper bound on shuffles per deal
pub const MAX_SHUFFLES: u32 = 1000;

pub trait PhaseHandler: Sync {
    /// Assigns the blockers for the phase about to begin
    fn start(&self, game: &mut Game, outbox: &mut Outbox);

    /// Validates and applies a move. On success the handler moves the game
    /// into the next "ready" phase once its own phase is complete.
    fn handle_action(
        &self,
        game: &mut Game,
        action: &PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError>;
}

/// The handler responsible for `phase` and for the ready phase in front of it
pub fn handler_for(phase: Phase) -> &'static dyn PhaseHandler {
    match phase {
        Phase::Deal | Phase::DealingReady => &DealHandler,
        Phase::BuildCrib | Phase::BuildCribReady => &BuildCribHandler,
        Phase::Cut | Phase::CutReady => &CutHandler,
        Phase::Pegging | Phase::PeggingReady => &PeggingHandler,
        Phase::Counting | Phase::CountingReady => &CountHandHandler,
        Phase::CribCounting | Phase::CribCountingReady => &CountCribHandler,
    }
}

fn wrong_blocker(expected: Blocker, action: &PlayerAction) -> GameError {
    GameError::WrongBlocker {
        expected,
        actual: action.overcomes(),
    }
}

/// Gives `player_id`'s color `points` and tells the table why
fn award(game: &mut Game, outbox: &mut Outbox, player_id: &str, points: u32, reasons: Vec<String>) {
    if points == 0 {
        return;
    }
    let Some(color) = game.color_of(player_id) else {
        return;
    };
    game.add_points(color, points);

    let name = game.player_name(player_id);
    outbox.score_update(
        reasons
            .into_iter()
            .map(|reason| format!("{} scored {}", name, reason))
            .collect(),
    );
}
