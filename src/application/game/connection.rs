use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent, PrepEndReason};
use crate::domain::services::preparation;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct MarkConnectedInput {
    pub match_id: String,
    pub player_id: String,
    pub connected: bool,
}

/// Flip a player's liveness hint. A disconnect during preparation can make
/// the remaining skip votes unanimous.
pub struct MarkConnected<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> MarkConnected<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: MarkConnectedInput,
    ) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        session
            .game
            .set_connected(&input.player_id, input.connected)?;

        if let Some(tally) = preparation::refresh_quorum(&mut session.game) {
            if tally.skipped {
                session.cancel_prep_timer();
                self.events.emit(
                    &input.match_id,
                    MatchEvent::PreparationPhaseEnded {
                        reason: PrepEndReason::AllVoted,
                    },
                );
            } else {
                self.events.emit(
                    &input.match_id,
                    MatchEvent::PreparationPhaseUpdated {
                        votes: tally.votes,
                        total_connected: tally.total_connected,
                    },
                );
            }
        }

        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        Ok(session.game.snapshot())
    }
}
