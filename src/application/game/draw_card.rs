use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::services::drawing;
use crate::domain::value_objects::MatchSnapshot;
use crate::infrastructure::match_store::MatchStore;

pub struct DrawCardInput {
    pub match_id: String,
    pub player_id: String,
}

pub struct DrawCardOutput {
    pub snapshot: MatchSnapshot,
    pub cards_drawn: usize,
    pub penalty: bool,
    /// The caller should arm the auto-pass deadline.
    pub pending_pass: bool,
    /// Deadline length for the pending pass.
    pub auto_pass_seconds: u64,
}

/// Draw card use case
pub struct DrawCard<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> DrawCard<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(&self, input: DrawCardInput) -> Result<DrawCardOutput, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        let outcome = drawing::execute_draw(&mut session.game, &input.player_id)?;
        session.cancel_auto_pass(&input.player_id);

        self.events.emit(&input.match_id, MatchEvent::StateUpdated);

        Ok(DrawCardOutput {
            snapshot: session.game.snapshot(),
            cards_drawn: outcome.cards_drawn,
            penalty: outcome.penalty,
            pending_pass: outcome.pending_pass,
            auto_pass_seconds: session.game.settings.auto_pass_seconds,
        })
    }
}
