//! Draw subsystem: penalty and voluntary draws, pending passes.

use crate::domain::entities::{GameMatch, MatchPhase};
use crate::domain::errors::GameError;
use crate::domain::value_objects::deck;

/// Result of a draw command.
#[derive(Debug, Clone, Copy)]
pub struct DrawOutcome {
    pub cards_drawn: usize,
    /// The draw discharged an active draw stack.
    pub penalty: bool,
    /// The player drew voluntarily and now must play or pass; the caller
    /// should arm the auto-pass deadline.
    pub pending_pass: bool,
    pub turn_advanced: bool,
}

/// Draw for the current player: the whole draw stack as a penalty, or a
/// single voluntary card.
pub fn execute_draw(game: &mut GameMatch, player_id: &str) -> Result<DrawOutcome, GameError> {
    if game.phase != MatchPhase::Playing {
        return Err(GameError::GamePhase);
    }
    let player = game.player(player_id).ok_or(GameError::PlayerState)?;
    if player.eliminated || player.safe {
        return Err(GameError::PlayerState);
    }
    if game.current_player_id() != Some(player_id) {
        return Err(GameError::NotYourTurn);
    }

    let penalty = game.draw_stack > 0;
    let target = if penalty {
        game.draw_stack as usize
    } else {
        if game.drew_this_turn.contains(player_id) {
            return Err(GameError::AlreadyDrew);
        }
        1
    };

    // One fresh deck is the growth limit per request; refuse up front so a
    // failing draw moves nothing.
    if target > game.available_without_injection() + deck::DECK_SIZE {
        return Err(GameError::DeckExhausted);
    }

    for _ in 0..target {
        let card = game.draw_one()?;
        if let Some(player) = game.player_mut(player_id) {
            player.hand.push(card);
        }
    }

    if penalty {
        game.draw_stack = 0;
        game.advance_turn(1);
        return Ok(DrawOutcome {
            cards_drawn: target,
            penalty: true,
            pending_pass: false,
            turn_advanced: true,
        });
    }

    if game.has_playable_card(player_id) {
        game.drew_this_turn.insert(player_id.to_owned());
        game.pending_pass = Some(player_id.to_owned());
        Ok(DrawOutcome {
            cards_drawn: target,
            penalty: false,
            pending_pass: true,
            turn_advanced: false,
        })
    } else {
        // Nothing playable even after the draw: the turn moves on by itself.
        game.advance_turn(1);
        Ok(DrawOutcome {
            cards_drawn: target,
            penalty: false,
            pending_pass: false,
            turn_advanced: true,
        })
    }
}

/// Explicit pass, only valid while the caller's pending pass is open.
pub fn execute_pass(game: &mut GameMatch, player_id: &str) -> Result<(), GameError> {
    if game.phase != MatchPhase::Playing {
        return Err(GameError::GamePhase);
    }
    if game.pending_pass.as_deref() != Some(player_id) {
        return Err(GameError::NoPendingPass);
    }
    game.advance_turn(1);
    Ok(())
}

/// Auto-pass deadline fired. Passes the turn if the pending pass is still
/// open; returns false when the timer is stale.
pub fn auto_pass_due(game: &mut GameMatch, player_id: &str) -> bool {
    if game.phase == MatchPhase::Playing && game.pending_pass.as_deref() == Some(player_id) {
        game.advance_turn(1);
        true
    } else {
        false
    }
}
