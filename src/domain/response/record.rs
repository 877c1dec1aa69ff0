//! Persisted respondent submissions.

use serde::{Deserialize, Serialize};

use crate::domain::flow::{AnswerValue, SubmissionDraft};
use crate::domain::form::QuestionType;
use crate::domain::foundation::{FormId, QuestionId, ResponseId, Timestamp};

/// One flattened answer as stored with a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    #[serde(default)]
    pub question_text: String,
    pub answer: AnswerValue,
    #[serde(default)]
    pub question_type: QuestionType,
}

/// Session metadata captured at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub completed_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u64>,
}

/// A complete submission for one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub id: ResponseId,
    pub form_id: FormId,
    /// Client-supplied session identifier.
    pub session_id: String,
    pub answers: Vec<AnswerRecord>,
    pub respondent_name: Option<String>,
    pub respondent_email: Option<String>,
    pub metadata: ResponseMetadata,
    pub submitted_at: Timestamp,
}

impl ResponseRecord {
    /// Builds the record to append for `form_id`.
    ///
    /// The completion time is always the server clock; a missing client
    /// session id becomes `session_<unix millis>`.
    pub fn from_draft(form_id: FormId, draft: SubmissionDraft) -> Self {
        let now = Timestamp::now();
        let session_id = draft
            .session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_session_id(&now));

        Self {
            id: ResponseId::new(),
            form_id,
            session_id,
            answers: draft.answers,
            respondent_name: non_blank(draft.respondent_name),
            respondent_email: non_blank(draft.respondent_email),
            metadata: ResponseMetadata {
                user_agent: non_blank(draft.user_agent),
                completed_at: now,
                time_spent_seconds: draft.time_spent_seconds,
            },
            submitted_at: now,
        }
    }

    /// Finds the answer given to `question_id`, if any.
    pub fn answer_for(&self, question_id: &QuestionId) -> Option<&AnswerRecord> {
        self.answers.iter().find(|a| &a.question_id == question_id)
    }
}

fn default_session_id(now: &Timestamp) -> String {
    format!("session_{}", now.as_unix_millis())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
