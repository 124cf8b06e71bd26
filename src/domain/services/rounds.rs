//! Round and tournament lifecycle: dealing, going safe, elimination,
//! play-again restarts.

use crate::domain::entities::{Direction, GameMatch, MatchPhase, MAX_PLAYERS, MIN_PLAYERS};
use crate::domain::errors::GameError;

/// How a round (and possibly the tournament) ended.
#[derive(Debug, Clone)]
pub struct RoundEndOutcome {
    /// The last non-safe player of the round, now out of the tournament.
    pub eliminated: Option<(String, String)>,
    /// Set when the tournament is over: the single remaining player.
    pub winner: Option<(String, String)>,
    /// A fresh round was dealt.
    pub new_round: bool,
}

/// Move a match out of `waiting`: deal round one and open the preparation
/// window.
pub fn start_match(game: &mut GameMatch) -> Result<(), GameError> {
    if game.phase != MatchPhase::Waiting {
        return Err(GameError::GamePhase);
    }
    deal_round(game);
    game.phase = MatchPhase::Preparation;
    Ok(())
}

/// Deal a fresh round: one new shuffled deck, `hand_size` cards per player
/// in round-robin order, one card flipped onto the discard pile. The flipped
/// card is inert - it contributes no effect.
pub fn deal_round(game: &mut GameMatch) {
    game.draw_pile.clear();
    game.discard_pile.clear();
    for player in &mut game.players {
        player.hand.clear();
    }
    game.decks_in_play = 0;
    game.inject_fresh_deck();

    game.rebuild_active_order();
    game.current_index = 0;

    for _ in 0..game.settings.hand_size {
        for pos in 0..game.active_order.len() {
            let player_id = game.active_order[pos].clone();
            if let Some(card) = game.draw_pile.pop() {
                if let Some(player) = game.player_mut(&player_id) {
                    player.hand.push(card);
                }
            }
        }
    }

    if let Some(flip) = game.draw_pile.pop() {
        game.discard_pile.push(flip);
    }
    game.declared_suit = None;
    game.draw_stack = 0;
}

/// The originator emptied their hand mid-play. Marks them safe, shrinks the
/// rotation and either re-bases the turn index or ends the round. `steps` is
/// the resolution delta the stack produced; a kept turn is forced one step
/// so the turn lands on a live player.
pub fn handle_player_out(
    game: &mut GameMatch,
    player_id: &str,
    origin: usize,
    steps: usize,
) -> Option<RoundEndOutcome> {
    if let Some(player) = game.player_mut(player_id) {
        player.safe = true;
    }

    if game.active_count() <= 2 {
        game.remove_from_rotation(player_id);
        return Some(finish_round(game));
    }

    let forced = if steps == 0 { 1 } else { steps };
    let landing = game.index_from(origin, forced);
    game.active_order.remove(origin);
    game.current_index = if landing > origin { landing - 1 } else { landing };
    None
}

/// Close the current round: eliminate the one player left holding cards,
/// then either finish the tournament or deal the next round.
pub fn finish_round(game: &mut GameMatch) -> RoundEndOutcome {
    let eliminated = game
        .players
        .iter_mut()
        .find(|p| !p.eliminated && !p.safe)
        .map(|p| {
            p.eliminated = true;
            (p.id.clone(), p.name.clone())
        });

    let remaining: Vec<(String, String)> = game
        .players
        .iter()
        .filter(|p| !p.eliminated)
        .map(|p| (p.id.clone(), p.name.clone()))
        .collect();

    if remaining.len() <= 1 {
        game.phase = MatchPhase::Finished;
        game.active_order.clear();
        game.current_index = 0;
        game.pending_pass = None;
        game.drew_this_turn.clear();
        RoundEndOutcome {
            eliminated,
            winner: remaining.into_iter().next(),
            new_round: false,
        }
    } else {
        start_new_round(game);
        RoundEndOutcome {
            eliminated,
            winner: None,
            new_round: true,
        }
    }
}

/// Reset per-round state and deal again. Later rounds skip the preparation
/// window and begin in `playing` directly.
pub fn start_new_round(game: &mut GameMatch) {
    game.round_number += 1;
    for player in &mut game.players {
        if !player.eliminated {
            player.safe = false;
        }
    }
    game.draw_stack = 0;
    game.declared_suit = None;
    game.direction = Direction::Forward;
    game.pending_pass = None;
    game.drew_this_turn.clear();
    deal_round(game);
    game.phase = MatchPhase::Playing;
}

/// Register a play-again vote from a connected player.
pub fn vote_play_again(game: &mut GameMatch, player_id: &str) -> Result<(), GameError> {
    if game.phase != MatchPhase::Finished {
        return Err(GameError::GamePhase);
    }
    let player = game.player(player_id).ok_or(GameError::PlayerState)?;
    if !player.connected {
        return Err(GameError::PlayerState);
    }
    game.play_again_votes.insert(player_id.to_owned());
    Ok(())
}

pub fn unvote_play_again(game: &mut GameMatch, player_id: &str) -> Result<(), GameError> {
    if game.phase != MatchPhase::Finished {
        return Err(GameError::GamePhase);
    }
    game.player(player_id).ok_or(GameError::PlayerState)?;
    game.play_again_votes.remove(player_id);
    Ok(())
}

/// Restart the tournament for everyone still connected. Creator-only, and
/// gated on the creator plus every connected player having voted.
pub fn reset_for_new_game(game: &mut GameMatch, caller_id: &str) -> Result<(), GameError> {
    if game.phase != MatchPhase::Finished {
        return Err(GameError::GamePhase);
    }
    if caller_id != game.creator_id {
        return Err(GameError::NotCreator);
    }
    if !game.play_again_votes.contains(&game.creator_id) {
        return Err(GameError::NotAllVoted);
    }
    let connected = game.connected_ids();
    if connected.iter().any(|id| !game.play_again_votes.contains(id)) {
        return Err(GameError::NotAllVoted);
    }
    if connected.len() < MIN_PLAYERS || connected.len() > MAX_PLAYERS {
        return Err(GameError::InsufficientPlayers);
    }

    game.players.retain(|p| p.connected);
    for player in &mut game.players {
        player.eliminated = false;
        player.safe = false;
        player.hand.clear();
    }
    game.round_number = 1;
    game.play_again_votes.clear();
    game.prep_votes.clear();
    game.direction = Direction::Forward;
    game.pending_pass = None;
    game.drew_this_turn.clear();
    deal_round(game);
    game.phase = MatchPhase::Playing;
    Ok(())
}
