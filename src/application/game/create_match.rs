use std::sync::Arc;

use uuid::Uuid;

use crate::application::game::MatchCommandError;
use crate::domain::entities::GameMatch;
use crate::domain::value_objects::{MatchSettings, MatchSnapshot};
use crate::infrastructure::match_store::MatchStore;

/// Create match input: ordered (id, name) seats, first seat is the creator.
pub struct CreateMatchInput {
    pub seats: Vec<(String, String)>,
    /// Deterministic shuffle seed, used by tests.
    pub seed: Option<u64>,
}

pub struct CreateMatchOutput {
    pub match_id: String,
    pub snapshot: MatchSnapshot,
}

/// Create match use case
pub struct CreateMatch<S: MatchStore> {
    store: Arc<S>,
    settings: MatchSettings,
}

impl<S: MatchStore> CreateMatch<S> {
    pub fn new(store: Arc<S>, settings: MatchSettings) -> Self {
        Self { store, settings }
    }

    pub async fn execute(
        &self,
        input: CreateMatchInput,
    ) -> Result<CreateMatchOutput, MatchCommandError> {
        let match_id = Uuid::new_v4().to_string();
        let game = GameMatch::new(
            match_id.clone(),
            input.seats,
            self.settings.clone(),
            input.seed,
        )?;
        let snapshot = game.snapshot();
        self.store.insert(game).await;

        tracing::info!("created match {}", match_id);
        Ok(CreateMatchOutput { match_id, snapshot })
    }
}
