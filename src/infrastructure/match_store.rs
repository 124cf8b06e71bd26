//! Match registry. One mutex per match serialises all public operations on
//! it; the registry itself is independent across matches.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::domain::entities::GameMatch;

/// A registered match plus its scheduled timers. Timer tasks re-enter
/// through the same mutex that guards the aggregate, so expiries are
/// serialised with user commands.
pub struct MatchSession {
    pub game: GameMatch,
    pub prep_timer: Option<JoinHandle<()>>,
    pub auto_pass_timers: HashMap<String, JoinHandle<()>>,
}

impl MatchSession {
    pub fn new(game: GameMatch) -> Self {
        Self {
            game,
            prep_timer: None,
            auto_pass_timers: HashMap::new(),
        }
    }

    pub fn cancel_prep_timer(&mut self) {
        if let Some(handle) = self.prep_timer.take() {
            handle.abort();
        }
    }

    pub fn cancel_auto_pass(&mut self, player_id: &str) {
        if let Some(handle) = self.auto_pass_timers.remove(player_id) {
            handle.abort();
        }
    }

    pub fn cancel_all_timers(&mut self) {
        self.cancel_prep_timer();
        for (_, handle) in self.auto_pass_timers.drain() {
            handle.abort();
        }
    }
}

impl Drop for MatchSession {
    fn drop(&mut self) {
        self.cancel_all_timers();
    }
}

pub type SharedSession = Arc<Mutex<MatchSession>>;

/// Injectable match store; tests and production share the in-memory
/// implementation, a persistent one can be swapped in behind this trait.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn insert(&self, game: GameMatch) -> SharedSession;

    async fn get(&self, match_id: &str) -> Option<SharedSession>;

    async fn remove(&self, match_id: &str) -> bool;

    async fn match_ids(&self) -> Vec<String>;
}

/// Process-local registry keyed by match id.
#[derive(Default)]
pub struct InMemoryMatchStore {
    sessions: RwLock<HashMap<String, SharedSession>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn insert(&self, game: GameMatch) -> SharedSession {
        let match_id = game.id.clone();
        let session = Arc::new(Mutex::new(MatchSession::new(game)));
        let mut sessions = self.sessions.write().await;
        sessions.insert(match_id, session.clone());
        session
    }

    async fn get(&self, match_id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(match_id).cloned()
    }

    async fn remove(&self, match_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(match_id).is_some()
    }

    async fn match_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }
}
