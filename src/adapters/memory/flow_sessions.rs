//! In-memory store for live respondent flow sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::flow::FlowSession;
use crate::domain::foundation::{FlowSessionId, Timestamp};
use crate::ports::{FlowSessionStore, SharedFlowSession};

/// Flow sessions keyed by id, each behind its own lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlowSessionStore {
    sessions: Arc<RwLock<HashMap<FlowSessionId, SharedFlowSession>>>,
}

impl InMemoryFlowSessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlowSessionStore for InMemoryFlowSessionStore {
    async fn insert(&self, session: FlowSession) -> SharedFlowSession {
        let id = *session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        shared
    }

    async fn get(&self, id: &FlowSessionId) -> Option<SharedFlowSession> {
        self.sessions.read().await.get(id).cloned()
    }

    async fn remove(&self, id: &FlowSessionId) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    async fn evict_idle(&self, ttl_secs: u64) -> usize {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        // A session whose lock is held is mid-request and therefore not idle.
        sessions.retain(|_, session| match session.try_lock() {
            Ok(guard) => !guard.is_idle(ttl_secs, &now),
            Err(_) => true,
        });
        before - sessions.len()
    }

    async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
