use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::errors::GameError;
use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::services::rounds;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct StartMatchInput {
    pub match_id: String,
    pub player_id: String,
}

pub struct StartMatchOutput {
    pub snapshot: MatchSnapshot,
    /// Countdown length the caller should arm.
    pub preparation_seconds: u64,
}

/// Start match use case: deal round one and open the preparation window.
pub struct StartMatch<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> StartMatch<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: StartMatchInput,
    ) -> Result<StartMatchOutput, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        if session.game.player(&input.player_id).is_none() {
            return Err(GameError::PlayerState.into());
        }
        rounds::start_match(&mut session.game)?;

        let preparation_seconds = session.game.settings.preparation_seconds;
        self.events.emit(
            &input.match_id,
            MatchEvent::PreparationPhaseStarted {
                seconds: preparation_seconds,
            },
        );

        Ok(StartMatchOutput {
            snapshot: session.game.snapshot(),
            preparation_seconds,
        })
    }
}
