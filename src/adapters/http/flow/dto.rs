//! HTTP DTOs for hosted respondent flows.

use serde::{Deserialize, Serialize};

use crate::application::handlers::flow::FlowSnapshot;
use crate::domain::flow::{AnswerMap, AnswerValue, FlowPosition, RespondentContact};
use crate::domain::form::{FormSettings, Question};
use crate::domain::foundation::QuestionId;

/// Optional body when starting a flow.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartFlowRequest {
    pub contact: Option<RespondentContact>,
    /// Client-side session identifier carried onto the stored response.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordAnswerRequest {
    pub answer: AnswerValue,
}

/// Step kind exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Intro,
    Question,
    Complete,
}

/// Flow state after every operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStateView {
    pub session_id: String,
    pub form_id: String,
    pub form_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_description: Option<String>,
    pub settings: FormSettings,
    pub contact: RespondentContact,
    pub step: FlowStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question_id: Option<QuestionId>,
    pub position_index: i64,
    pub total_questions: usize,
    pub progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_question: Option<Question>,
    pub can_proceed: bool,
    pub answers: AnswerMap,
    pub suppressed: Vec<QuestionId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_added: Option<QuestionId>,
}

impl From<FlowSnapshot> for FlowStateView {
    fn from(snapshot: FlowSnapshot) -> Self {
        let (step, current_question_id) = match snapshot.position {
            FlowPosition::Intro => (FlowStep::Intro, None),
            FlowPosition::Question(id) => (FlowStep::Question, Some(id)),
            FlowPosition::Complete => (FlowStep::Complete, None),
        };
        Self {
            session_id: snapshot.session_id.to_string(),
            form_id: snapshot.form_id.to_string(),
            form_title: snapshot.form_title,
            form_description: snapshot.form_description,
            settings: snapshot.settings,
            contact: snapshot.contact,
            step,
            current_question_id,
            position_index: snapshot.position_index,
            total_questions: snapshot.total_questions,
            progress: snapshot.progress,
            current_question: snapshot.current_question,
            can_proceed: snapshot.can_proceed,
            answers: snapshot.answers,
            suppressed: snapshot.suppressed,
            follow_up_added: None,
        }
    }
}

impl FlowStateView {
    pub fn with_follow_up(mut self, follow_up: Option<QuestionId>) -> Self {
        self.follow_up_added = follow_up;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSubmitResponse {
    pub message: String,
    pub response_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_body_is_fully_optional() {
        let req: StartFlowRequest = serde_json::from_str("{}").unwrap();
        assert!(req.contact.is_none());
        assert!(req.session_id.is_none());
    }

    #[test]
    fn answer_accepts_any_json_scalar() {
        let req: RecordAnswerRequest = serde_json::from_str(r#"{"answer": 3}"#).unwrap();
        assert_eq!(req.answer, AnswerValue::from(3.0));
        let req: RecordAnswerRequest = serde_json::from_str(r#"{"answer": "fine"}"#).unwrap();
        assert_eq!(req.answer, AnswerValue::text("fine"));
    }

    #[test]
    fn step_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FlowStep::Complete).unwrap(), "\"complete\"");
    }
}
