use std::sync::Arc;

use async_broadcast::{broadcast, Receiver, Sender};

use crate::domain::events::{EventSink, MatchEvent};
use crate::domain::value_objects::MatchSettings;
use crate::infrastructure::match_store::InMemoryMatchStore;

/// Application state shared across all handlers
pub struct AppState {
    /// Match registry
    pub store: Arc<InMemoryMatchStore>,

    /// Settings applied to newly created matches
    pub settings: MatchSettings,

    /// Event broadcaster for SSE
    pub event_sender: Sender<GameEvent>,
    pub event_receiver: Receiver<GameEvent>,

    /// Sink handed to the engine use cases
    pub events: Arc<dyn EventSink>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(MatchSettings::from_env())
    }

    pub fn with_settings(settings: MatchSettings) -> Self {
        // Capacity of 1000 events before overflow drops the oldest.
        let (mut event_sender, event_receiver) = broadcast(1000);
        event_sender.set_overflow(true);
        let events: Arc<dyn EventSink> = Arc::new(BroadcastEventSink {
            sender: event_sender.clone(),
        });
        Self {
            store: Arc::new(InMemoryMatchStore::new()),
            settings,
            event_sender,
            event_receiver,
            events,
        }
    }
}

/// Wire envelope for broadcast events.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub match_id: String,
    /// Additional data fields (flattened into root)
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub timestamp: i64,
}

impl GameEvent {
    pub fn from_match_event(match_id: &str, event: &MatchEvent) -> Self {
        let data = match event {
            MatchEvent::PreparationPhaseStarted { seconds } => {
                serde_json::json!({ "seconds": seconds })
            }
            MatchEvent::PreparationPhaseUpdated {
                votes,
                total_connected,
            } => serde_json::json!({ "votes": votes, "totalConnected": total_connected }),
            MatchEvent::PreparationPhaseEnded { reason } => {
                serde_json::json!({ "reason": reason.as_str() })
            }
            MatchEvent::StateUpdated => serde_json::json!({}),
            MatchEvent::RoundEnded {
                eliminated_id,
                eliminated_name,
            } => serde_json::json!({
                "eliminatedId": eliminated_id,
                "eliminatedName": eliminated_name,
            }),
            MatchEvent::GameFinished {
                winner_id,
                winner_name,
            } => serde_json::json!({
                "winnerId": winner_id,
                "winnerName": winner_name,
            }),
        };
        Self {
            event_type: event.kind().to_string(),
            match_id: match_id.to_string(),
            data,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// `EventSink` backed by the SSE broadcaster. Fire-and-forget: delivery
/// guarantees are the subscribers' concern.
struct BroadcastEventSink {
    sender: Sender<GameEvent>,
}

impl EventSink for BroadcastEventSink {
    fn emit(&self, match_id: &str, event: MatchEvent) {
        let envelope = GameEvent::from_match_event(match_id, &event);
        tracing::debug!(
            "broadcasting event '{}' for match {} to {} receivers",
            envelope.event_type,
            match_id,
            self.sender.receiver_count()
        );
        if let Err(e) = self.sender.try_broadcast(envelope) {
            tracing::warn!("failed to broadcast event: {:?}", e);
        }
    }
}
