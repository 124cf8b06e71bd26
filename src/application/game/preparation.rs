use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent, PrepEndReason};
use crate::domain::services::preparation;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct PrepVoteInput {
    pub match_id: String,
    pub player_id: String,
}

pub struct PrepVoteOutput {
    pub snapshot: MatchSnapshot,
    /// The vote became unanimous and play began.
    pub skipped: bool,
}

/// Vote to skip the preparation countdown.
pub struct VoteSkipPreparation<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> VoteSkipPreparation<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(&self, input: PrepVoteInput) -> Result<PrepVoteOutput, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        let tally = preparation::vote_skip(&mut session.game, &input.player_id)?;
        if tally.skipped {
            session.cancel_prep_timer();
            self.events.emit(
                &input.match_id,
                MatchEvent::PreparationPhaseEnded {
                    reason: PrepEndReason::AllVoted,
                },
            );
            self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        } else {
            self.events.emit(
                &input.match_id,
                MatchEvent::PreparationPhaseUpdated {
                    votes: tally.votes,
                    total_connected: tally.total_connected,
                },
            );
        }

        Ok(PrepVoteOutput {
            snapshot: session.game.snapshot(),
            skipped: tally.skipped,
        })
    }
}

/// Withdraw a preparation skip vote.
pub struct UnvoteSkipPreparation<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> UnvoteSkipPreparation<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(&self, input: PrepVoteInput) -> Result<PrepVoteOutput, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        let tally = preparation::unvote_skip(&mut session.game, &input.player_id)?;
        self.events.emit(
            &input.match_id,
            MatchEvent::PreparationPhaseUpdated {
                votes: tally.votes,
                total_connected: tally.total_connected,
            },
        );

        Ok(PrepVoteOutput {
            snapshot: session.game.snapshot(),
            skipped: false,
        })
    }
}

/// Preparation countdown fired. Posted through the same per-match mutex as
/// user commands; a stale expiry is a no-op.
pub async fn preparation_deadline<S: MatchStore>(
    store: Arc<S>,
    events: Arc<dyn EventSink>,
    match_id: String,
) {
    let Some(session) = store.get(&match_id).await else {
        return;
    };
    let mut session = session.lock().await;
    if preparation::preparation_expired(&mut session.game) {
        session.prep_timer = None;
        events.emit(
            &match_id,
            MatchEvent::PreparationPhaseEnded {
                reason: PrepEndReason::Timeout,
            },
        );
        events.emit(&match_id, MatchEvent::StateUpdated);
        tracing::debug!("preparation countdown expired for match {}", match_id);
    }
}
