//! Flow-specific error types.

use crate::domain::form::FormError;
use crate::domain::foundation::{DomainError, ErrorCode, FlowSessionId, FormId, QuestionId};

/// Errors raised while driving a respondent flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Session was not found (or was evicted).
    SessionNotFound(FlowSessionId),
    /// Question id is not part of the effective sequence.
    UnknownQuestion(QuestionId),
    /// Question is currently hidden by its trigger condition.
    QuestionSuppressed(QuestionId),
    /// Name and email are required before the first question.
    ContactIncomplete,
    /// A required question has no answer.
    AnswerRequired(QuestionId),
    /// Advance was requested past the terminal state.
    AlreadyComplete,
    /// Submit was requested before the terminal state.
    NotComplete,
    /// The form behind the flow does not exist.
    FormNotFound(FormId),
    /// The form is unpublished.
    NotAcceptingResponses(FormId),
    /// Infrastructure error.
    Infrastructure(String),
}

impl FlowError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FlowError::SessionNotFound(_) => ErrorCode::FlowSessionNotFound,
            FlowError::UnknownQuestion(_)
            | FlowError::ContactIncomplete
            | FlowError::AnswerRequired(_) => ErrorCode::ValidationFailed,
            FlowError::QuestionSuppressed(_)
            | FlowError::AlreadyComplete
            | FlowError::NotComplete => ErrorCode::InvalidStateTransition,
            FlowError::FormNotFound(_) => ErrorCode::FormNotFound,
            FlowError::NotAcceptingResponses(_) => ErrorCode::FormNotPublished,
            FlowError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FlowError::SessionNotFound(id) => format!("Flow session not found: {}", id),
            FlowError::UnknownQuestion(id) => {
                format!("Question '{}' is not part of this flow", id)
            }
            FlowError::QuestionSuppressed(id) => {
                format!("Question '{}' is hidden by its trigger condition", id)
            }
            FlowError::ContactIncomplete => "Name and email are required".to_string(),
            FlowError::AnswerRequired(id) => format!("Question '{}' requires an answer", id),
            FlowError::AlreadyComplete => "All questions have been answered".to_string(),
            FlowError::NotComplete => "The flow has unanswered questions".to_string(),
            FlowError::FormNotFound(id) => format!("Form not found: {}", id),
            FlowError::NotAcceptingResponses(_) => {
                "This form is not accepting responses".to_string()
            }
            FlowError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FlowError {}

impl From<FormError> for FlowError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotFound(id) => FlowError::FormNotFound(id),
            FormError::NotAcceptingResponses(id) => FlowError::NotAcceptingResponses(id),
            other => FlowError::Infrastructure(other.to_string()),
        }
    }
}

impl From<DomainError> for FlowError {
    fn from(err: DomainError) -> Self {
        FormError::from(err).into()
    }
}
