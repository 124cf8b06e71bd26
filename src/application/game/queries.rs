use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::value_objects::{Card, MatchSnapshot};
use crate::infrastructure::match_store::MatchStore;

pub struct GetStateInput {
    pub match_id: String,
}

/// Snapshot query; hands are never included.
pub struct GetState<S: MatchStore> {
    store: Arc<S>,
}

impl<S: MatchStore> GetState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: GetStateInput) -> Result<MatchSnapshot, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let session = session.lock().await;
        Ok(session.game.snapshot())
    }
}

pub struct GetHandInput {
    pub match_id: String,
    pub player_id: String,
}

/// Per-player hand view in insertion order.
pub struct GetHand<S: MatchStore> {
    store: Arc<S>,
}

impl<S: MatchStore> GetHand<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: GetHandInput) -> Result<Vec<Card>, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let session = session.lock().await;
        Ok(session.game.hand(&input.player_id)?)
    }
}
