use std::sync::Arc;

use crate::application::game::MatchCommandError;
use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::services::play;
use crate::domain::value_objects::{Card, MatchSnapshot, Suit};
use crate::infrastructure::match_store::MatchStore;

pub struct PlayCardsInput {
    pub match_id: String,
    pub player_id: String,
    /// Ordered stack, first card lands on the current top.
    pub cards: Vec<Card>,
    pub declared_suit: Option<Suit>,
}

pub struct PlayCardsOutput {
    pub snapshot: MatchSnapshot,
    pub went_safe: bool,
    pub remaining_cards: usize,
}

/// Play cards use case
pub struct PlayCards<S: MatchStore> {
    store: Arc<S>,
    events: Arc<dyn EventSink>,
}

impl<S: MatchStore> PlayCards<S> {
    pub fn new(store: Arc<S>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    pub async fn execute(
        &self,
        input: PlayCardsInput,
    ) -> Result<PlayCardsOutput, MatchCommandError> {
        let session = self
            .store
            .get(&input.match_id)
            .await
            .ok_or(MatchCommandError::MatchNotFound)?;
        let mut session = session.lock().await;

        let outcome = play::execute_play(
            &mut session.game,
            &input.player_id,
            &input.cards,
            input.declared_suit,
        )?;

        // The play supersedes any auto-pass armed for this player.
        session.cancel_auto_pass(&input.player_id);

        self.events.emit(&input.match_id, MatchEvent::StateUpdated);
        if let Some(round_end) = &outcome.round_end {
            session.cancel_all_timers();
            if let Some((id, name)) = &round_end.eliminated {
                self.events.emit(
                    &input.match_id,
                    MatchEvent::RoundEnded {
                        eliminated_id: id.clone(),
                        eliminated_name: name.clone(),
                    },
                );
            }
            if let Some((id, name)) = &round_end.winner {
                self.events.emit(
                    &input.match_id,
                    MatchEvent::GameFinished {
                        winner_id: id.clone(),
                        winner_name: name.clone(),
                    },
                );
            }
        }

        let remaining_cards = session
            .game
            .player(&input.player_id)
            .map(|p| p.hand.len())
            .unwrap_or(0);

        Ok(PlayCardsOutput {
            snapshot: session.game.snapshot(),
            went_safe: outcome.went_safe,
            remaining_cards,
        })
    }
}
