//! GoBackHandler - Steps a flow back to the previous visible question.

use std::sync::Arc;

use crate::domain::flow::FlowError;
use crate::domain::foundation::FlowSessionId;
use crate::ports::FlowSessionStore;

use super::{load_session, FlowSnapshot};

#[derive(Debug, Clone)]
pub struct GoBackCommand {
    pub session_id: FlowSessionId,
}

pub struct GoBackHandler {
    sessions: Arc<dyn FlowSessionStore>,
}

impl GoBackHandler {
    pub fn new(sessions: Arc<dyn FlowSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: GoBackCommand) -> Result<FlowSnapshot, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut session = shared.lock().await;
        session.back();
        Ok(FlowSnapshot::capture(&session))
    }
}
