//! Timer scheduling. Expiries are posted back through the per-match mutex
//! (the same serialisation point as user commands), never applied inline.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::application::game::preparation_deadline;
use crate::domain::services::drawing;
use crate::domain::events::{EventSink, MatchEvent};
use crate::infrastructure::app_state::AppState;
use crate::infrastructure::match_store::MatchStore;

/// Arm the preparation countdown and remember the handle on the session.
pub async fn schedule_preparation_timeout(state: Arc<AppState>, match_id: String, seconds: u64) {
    let Some(session) = state.store.get(&match_id).await else {
        return;
    };
    let handle = spawn_preparation(state.clone(), match_id.clone(), seconds);
    let mut session = session.lock().await;
    session.cancel_prep_timer();
    session.prep_timer = Some(handle);
}

fn spawn_preparation(state: Arc<AppState>, match_id: String, seconds: u64) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(seconds)).await;
        preparation_deadline(state.store.clone(), state.events.clone(), match_id).await;
    })
}

/// Arm the auto-pass deadline for a player with an open pending pass.
pub async fn schedule_auto_pass(
    state: Arc<AppState>,
    match_id: String,
    player_id: String,
    seconds: u64,
) {
    let Some(session) = state.store.get(&match_id).await else {
        return;
    };
    let handle = spawn_auto_pass(state.clone(), match_id.clone(), player_id.clone(), seconds);
    let mut session = session.lock().await;
    session.cancel_auto_pass(&player_id);
    session.auto_pass_timers.insert(player_id, handle);
}

fn spawn_auto_pass(
    state: Arc<AppState>,
    match_id: String,
    player_id: String,
    seconds: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(seconds)).await;
        let Some(session) = state.store.get(&match_id).await else {
            return;
        };
        let mut session = session.lock().await;
        session.auto_pass_timers.remove(&player_id);
        if drawing::auto_pass_due(&mut session.game, &player_id) {
            tracing::debug!(
                "auto-pass deadline fired for player {} in match {}",
                player_id,
                match_id
            );
            state
                .events
                .emit(&match_id, MatchEvent::StateUpdated);
        }
    })
}
