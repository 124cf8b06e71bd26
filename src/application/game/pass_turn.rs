use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::services::drawing;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct PassTurnInput {
    pub match_id: String,
    pub player_id: String,
}

/// Pass turn use case: close an open pending pass.
pub struct PassTurn<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> PassTurn<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(&self, input: PassTurnInput) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        drawing::execute_pass(&mut session.game, &input.player_id)?;
        session.cancel_auto_pass(&input.player_id);

        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        Ok(session.game.snapshot())
    }
}
