//! GetFlowStateHandler - Reads the current state of a flow.

use std::sync::Arc;

use crate::domain::flow::FlowError;
use crate::domain::foundation::FlowSessionId;
use crate::ports::FlowSessionStore;

use super::{load_session, FlowSnapshot};

#[derive(Debug, Clone)]
pub struct GetFlowStateQuery {
    pub session_id: FlowSessionId,
}

pub struct GetFlowStateHandler {
    sessions: Arc<dyn FlowSessionStore>,
}

impl GetFlowStateHandler {
    pub fn new(sessions: Arc<dyn FlowSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, query: GetFlowStateQuery) -> Result<FlowSnapshot, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &query.session_id).await?;
        let session = shared.lock().await;
        Ok(FlowSnapshot::capture(&session))
    }
}
