//! Flow session store port.
//!
//! Live respondent flows are kept server-side between requests. Each session
//! sits behind its own lock so one respondent's steps are serialized while
//! different respondents proceed independently.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::flow::FlowSession;
use crate::domain::foundation::FlowSessionId;

/// A session shared between the store and the request handling it.
pub type SharedFlowSession = Arc<Mutex<FlowSession>>;

#[async_trait]
pub trait FlowSessionStore: Send + Sync {
    /// Register a new session and return its shared handle.
    async fn insert(&self, session: FlowSession) -> SharedFlowSession;

    async fn get(&self, id: &FlowSessionId) -> Option<SharedFlowSession>;

    /// Forget a session; returns whether it existed.
    async fn remove(&self, id: &FlowSessionId) -> bool;

    /// Drop sessions idle for longer than `ttl_secs`; returns how many.
    async fn evict_idle(&self, ttl_secs: u64) -> usize;

    /// Number of live sessions.
    async fn active_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn FlowSessionStore) {}
    }
}
