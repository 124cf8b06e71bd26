//! Preparation phase: a bounded pre-play window ended by a unanimous skip
//! vote of the connected players or by the countdown.

use crate::domain::entities::{GameMatch, MatchPhase};
use crate::domain::errors::GameError;

/// Vote tally after a preparation command.
#[derive(Debug, Clone, Copy)]
pub struct PrepTally {
    pub votes: usize,
    pub total_connected: usize,
    /// The vote became unanimous and the match moved to `playing`.
    pub skipped: bool,
}

/// Cast a skip vote. Unanimity among connected players ends the phase
/// immediately.
pub fn vote_skip(game: &mut GameMatch, player_id: &str) -> Result<PrepTally, GameError> {
    let player = require_preparation(game, player_id)?;
    if !player.connected {
        return Err(GameError::PlayerState);
    }
    game.prep_votes.insert(player_id.to_owned());
    Ok(settle_quorum(game))
}

/// Withdraw a skip vote.
pub fn unvote_skip(game: &mut GameMatch, player_id: &str) -> Result<PrepTally, GameError> {
    require_preparation(game, player_id)?;
    game.prep_votes.remove(player_id);
    Ok(tally(game))
}

/// Re-check the quorum after connectivity changed; a disconnect can make the
/// remaining votes unanimous.
pub fn refresh_quorum(game: &mut GameMatch) -> Option<PrepTally> {
    (game.phase == MatchPhase::Preparation).then(|| settle_quorum(game))
}

/// Countdown fired. Returns false when the phase already ended.
pub fn preparation_expired(game: &mut GameMatch) -> bool {
    if game.phase == MatchPhase::Preparation {
        game.phase = MatchPhase::Playing;
        true
    } else {
        false
    }
}

fn require_preparation<'a>(
    game: &'a GameMatch,
    player_id: &str,
) -> Result<&'a crate::domain::entities::Player, GameError> {
    if game.phase != MatchPhase::Preparation {
        return Err(GameError::GamePhase);
    }
    game.player(player_id).ok_or(GameError::PlayerState)
}

fn tally(game: &GameMatch) -> PrepTally {
    let total_connected = game.players.iter().filter(|p| p.connected).count();
    PrepTally {
        votes: game.prep_votes.len(),
        total_connected,
        skipped: false,
    }
}

fn settle_quorum(game: &mut GameMatch) -> PrepTally {
    let mut result = tally(game);
    let unanimous = result.total_connected > 0
        && game
            .players
            .iter()
            .filter(|p| p.connected)
            .all(|p| game.prep_votes.contains(&p.id));
    if unanimous {
        game.phase = MatchPhase::Playing;
        result.skipped = true;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::rounds;
    use crate::domain::value_objects::MatchSettings;

    fn prep_match(n: usize) -> GameMatch {
        let seats = ["a", "b", "c"]
            .iter()
            .take(n)
            .map(|id| (id.to_string(), id.to_uppercase()))
            .collect();
        let mut game =
            GameMatch::new("m".into(), seats, MatchSettings::default(), Some(3)).unwrap();
        rounds::start_match(&mut game).unwrap();
        game
    }

    #[test]
    fn test_unanimous_votes_skip_the_countdown() {
        let mut game = prep_match(3);

        let tally = vote_skip(&mut game, "a").unwrap();
        assert!(!tally.skipped);
        assert_eq!(tally.votes, 1);

        vote_skip(&mut game, "b").unwrap();
        let tally = vote_skip(&mut game, "c").unwrap();
        assert!(tally.skipped);
        assert_eq!(game.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_disconnected_players_do_not_count_toward_quorum() {
        let mut game = prep_match(3);
        game.player_mut("c").unwrap().connected = false;

        vote_skip(&mut game, "a").unwrap();
        let tally = vote_skip(&mut game, "b").unwrap();
        assert!(tally.skipped);
    }

    #[test]
    fn test_disconnect_after_voting_can_complete_the_quorum() {
        let mut game = prep_match(3);
        vote_skip(&mut game, "a").unwrap();
        vote_skip(&mut game, "b").unwrap();

        game.player_mut("c").unwrap().connected = false;
        let tally = refresh_quorum(&mut game).unwrap();
        assert!(tally.skipped);
        assert_eq!(game.phase, MatchPhase::Playing);
    }

    #[test]
    fn test_unvote_reopens_the_quorum() {
        let mut game = prep_match(2);
        vote_skip(&mut game, "a").unwrap();
        unvote_skip(&mut game, "a").unwrap();

        let tally = vote_skip(&mut game, "b").unwrap();
        assert!(!tally.skipped);
        assert_eq!(game.phase, MatchPhase::Preparation);
    }

    #[test]
    fn test_expiry_is_idempotent() {
        let mut game = prep_match(2);
        assert!(preparation_expired(&mut game));
        assert_eq!(game.phase, MatchPhase::Playing);
        assert!(!preparation_expired(&mut game));
    }

    #[test]
    fn test_votes_outside_preparation_are_rejected() {
        let mut game = prep_match(2);
        preparation_expired(&mut game);
        assert_eq!(
            vote_skip(&mut game, "a").unwrap_err(),
            GameError::GamePhase
        );
    }
}
