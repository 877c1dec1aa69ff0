//! Read model of a flow session returned by every flow handler.

use crate::domain::flow::{AnswerMap, FlowPosition, FlowSession, RespondentContact};
use crate::domain::form::{FormSettings, Question};
use crate::domain::foundation::{FlowSessionId, FormId, QuestionId};

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSnapshot {
    pub session_id: FlowSessionId,
    pub form_id: FormId,
    pub form_title: String,
    pub form_description: Option<String>,
    pub settings: FormSettings,
    pub contact: RespondentContact,
    pub position: FlowPosition,
    /// -1 on the intro step, the sequence length when complete.
    pub position_index: i64,
    pub total_questions: usize,
    pub progress: f64,
    pub current_question: Option<Question>,
    pub can_proceed: bool,
    pub answers: AnswerMap,
    /// Sorted for stable output.
    pub suppressed: Vec<QuestionId>,
}

impl FlowSnapshot {
    pub fn capture(session: &FlowSession) -> Self {
        let mut suppressed: Vec<QuestionId> = session.suppressed().into_iter().collect();
        suppressed.sort();

        Self {
            session_id: *session.id(),
            form_id: *session.form_id(),
            form_title: session.form_title().to_string(),
            form_description: session.form_description().map(str::to_string),
            settings: session.settings().clone(),
            contact: session.contact().clone(),
            position: session.position().clone(),
            position_index: session.position_index(),
            total_questions: session.effective_questions().len(),
            progress: session.progress_fraction(),
            current_question: session.current_question().cloned(),
            can_proceed: session.can_proceed(),
            answers: session.answers().clone(),
            suppressed,
        }
    }
}
