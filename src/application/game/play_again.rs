use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::services::rounds;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct PlayAgainVoteInput {
    pub match_id: String,
    pub player_id: String,
}

/// Vote to play another tournament after `finished`.
pub struct VotePlayAgain<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> VotePlayAgain<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: PlayAgainVoteInput,
    ) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        rounds::vote_play_again(&mut session.game, &input.player_id)?;
        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        Ok(session.game.snapshot())
    }
}

pub struct UnvotePlayAgain<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> UnvotePlayAgain<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: PlayAgainVoteInput,
    ) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        rounds::unvote_play_again(&mut session.game, &input.player_id)?;
        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        Ok(session.game.snapshot())
    }
}

pub struct ResetForNewGameInput {
    pub match_id: String,
    pub player_id: String,
}

/// Restart the tournament for the connected players. Creator-only and gated
/// on unanimous play-again votes.
pub struct ResetForNewGame<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> ResetForNewGame<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: ResetForNewGameInput,
    ) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        rounds::reset_for_new_game(&mut session.game, &input.player_id)?;
        session.cancel_all_timers();

        tracing::info!("match {} restarted for a new game", input.match_id);
        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        Ok(session.game.snapshot())
    }
}
