//! Routes moves to the phase handlers and walks the game through its
//! phase cycle.
//!
//! Every move is applied to a copy of the game and only committed when the
//! handler accepts it, so a rejected move never leaves partial changes.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::action::PlayerAction;
use super::errors::{ErrorKind, GameError};
use super::model::{Game, NewPlayer, Player, PlayerColor};
use super::notify::Outbox;
use super::phases::handler_for;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

pub struct PhaseController;

impl PhaseController {
    /// Seats `players` in the order given. Seat 0 deals first.
    pub fn new_game(
        id: &str,
        players: &[NewPlayer],
        deck_seed: u64,
        outbox: &mut Outbox,
    ) -> Result<Game, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(GameError::InvalidSetup(format!(
                "Cribbage needs {} to {} players, got {}",
                MIN_PLAYERS,
                MAX_PLAYERS,
                players.len()
            )));
        }

        let mut seen = HashSet::new();
        for player in players {
            if player.id.trim().is_empty() {
                return Err(GameError::InvalidSetup(
                    "Player IDs cannot be empty".to_string(),
                ));
            }
            if !seen.insert(player.id.as_str()) {
                return Err(GameError::InvalidSetup(format!(
                    "Player {} is seated twice",
                    player.id
                )));
            }
        }

        let seated = players
            .iter()
            .enumerate()
            .map(|(seat, p)| Player {
                id: p.id.clone(),
                name: p.name.clone(),
                color: PlayerColor::for_seat(seat, players.len()),
            })
            .collect();

        let mut game = Game::new(id.to_string(), seated, deck_seed);
        handler_for(game.phase).start(&mut game, outbox);

        info!(
            game_id = %game.id,
            players = game.players.len(),
            dealer = %game.current_dealer,
            "Game created"
        );
        Ok(game)
    }

    /// Applies `action` to `game`.
    ///
    /// On success `game` holds the new state and `outbox` everything the
    /// players need to hear. On rejection `game` is untouched and `outbox`
    /// tells the acting player what went wrong: a move with a bad payload or
    /// a disputed count gets the same blocker back with the reason attached.
    pub fn handle_action(
        game: &mut Game,
        action: PlayerAction,
        outbox: &mut Outbox,
    ) -> Result<(), GameError> {
        let mut next = game.clone();
        let mut pending = Outbox::new();

        match apply(&mut next, &action, &mut pending) {
            Ok(()) => {
                *game = next;
                outbox.append(pending);
                Ok(())
            }
            Err(err) => {
                warn!(
                    game_id = %game.id,
                    player_id = %action.player_id,
                    error = %err,
                    "Move rejected"
                );
                explain_rejection(game, &action, &err, outbox);
                Err(err)
            }
        }
    }

    /// Replays `actions` on top of `pristine`, the game as it stood before
    /// its first move. Deals are keyed to their place in the log, so the
    /// result matches the game that originally received those moves.
    pub fn rebuild(pristine: &Game, actions: &[PlayerAction]) -> Result<Game, GameError> {
        let mut game = pristine.clone();
        let mut discarded = Outbox::new();
        for action in actions {
            apply(&mut game, action, &mut discarded)?;
        }
        Ok(game)
    }
}

fn apply(game: &mut Game, action: &PlayerAction, outbox: &mut Outbox) -> Result<(), GameError> {
    if action.game_id != game.id {
        return Err(GameError::WrongGame {
            game: game.id.clone(),
            action_game: action.game_id.clone(),
        });
    }
    if !game.is_participant(&action.player_id) {
        return Err(GameError::UnknownPlayer(action.player_id.clone()));
    }
    if game.is_over() {
        return Err(GameError::GameOver);
    }
    if game.phase.is_ready() {
        return Err(GameError::PhaseNotActive(game.phase));
    }

    let expected = game
        .blocker_for(&action.player_id)
        .ok_or_else(|| GameError::NotBlocking(action.player_id.clone()))?;
    if expected != action.overcomes() {
        return Err(GameError::WrongBlocker {
            expected,
            actual: action.overcomes(),
        });
    }

    game.actions.push(action.clone());
    handler_for(game.phase).handle_action(game, action, outbox)?;

    if game.phase.is_ready() {
        handler_for(game.phase).start(game, outbox);
        game.phase = game.phase.next();
        debug!(game_id = %game.id, phase = %game.phase, "Phase started");
    }

    if let Some(color) = game.winner() {
        game.blocking_players.clear();
        let winners: Vec<String> = game
            .players
            .iter()
            .filter(|p| p.color == color)
            .map(|p| p.name.clone())
            .collect();
        info!(game_id = %game.id, winner = %color, "Game over");
        outbox.broadcast(
            game,
            format!("{} won with {} points", winners.join(" & "), game.score(color)),
        );
    }
    Ok(())
}

fn explain_rejection(game: &Game, action: &PlayerAction, err: &GameError, outbox: &mut Outbox) {
    if !game.is_participant(&action.player_id) {
        return;
    }
    match (err.kind(), game.blocker_for(&action.player_id)) {
        (ErrorKind::Payload | ErrorKind::Scoring, Some(blocker)) => {
            outbox.blocking(&action.player_id, blocker, err.to_string());
        }
        _ => outbox.message(&action.player_id, err.to_string()),
    }
}
