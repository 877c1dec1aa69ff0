//! RecordAnswerHandler - Stores one answer in a flow.

use std::sync::Arc;

use crate::domain::flow::{AnswerValue, FlowError};
use crate::domain::foundation::{FlowSessionId, QuestionId};
use crate::ports::FlowSessionStore;

use super::{load_session, FlowSnapshot};

#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub session_id: FlowSessionId,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// Handler for answers. Unknown and currently hidden questions are
/// rejected; re-answering overwrites.
pub struct RecordAnswerHandler {
    sessions: Arc<dyn FlowSessionStore>,
}

impl RecordAnswerHandler {
    pub fn new(sessions: Arc<dyn FlowSessionStore>) -> Self {
        Self { sessions }
    }

    pub async fn handle(&self, cmd: RecordAnswerCommand) -> Result<FlowSnapshot, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let mut session = shared.lock().await;
        session.record_answer(cmd.question_id, cmd.value)?;
        Ok(FlowSnapshot::capture(&session))
    }
}
