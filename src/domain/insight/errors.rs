//! Insight-specific error types.

use crate::domain::form::FormError;
use crate::domain::foundation::{DomainError, ErrorCode, FormId};

/// Errors from generating or reading insights and the data assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// No insight has been generated for the form yet.
    NotFound(FormId),
    /// The form itself does not exist.
    FormNotFound(FormId),
    /// User does not own the form.
    Forbidden,
    /// Insights need at least one response.
    NoResponses(FormId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The generator returned text that is not a usable payload.
    MalformedPayload(String),
    /// The generator call itself failed.
    GenerationFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl InsightError {
    pub fn malformed(message: impl Into<String>) -> Self {
        InsightError::MalformedPayload(message.into())
    }
    pub fn generation_failed(message: impl Into<String>) -> Self {
        InsightError::GenerationFailed(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        InsightError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            InsightError::NotFound(_) => ErrorCode::InsightNotFound,
            InsightError::FormNotFound(_) => ErrorCode::FormNotFound,
            InsightError::Forbidden => ErrorCode::Forbidden,
            InsightError::NoResponses(_) => ErrorCode::NoResponses,
            InsightError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            InsightError::MalformedPayload(_) | InsightError::GenerationFailed(_) => {
                ErrorCode::AIProviderError
            }
            InsightError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            InsightError::NotFound(_) => "No insights generated yet".to_string(),
            InsightError::FormNotFound(id) => format!("Form not found: {}", id),
            InsightError::Forbidden => "Permission denied".to_string(),
            InsightError::NoResponses(_) => "No responses to analyze yet".to_string(),
            InsightError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            InsightError::MalformedPayload(msg) => {
                format!("AI returned an unusable analysis: {}", msg)
            }
            InsightError::GenerationFailed(msg) => format!("AI analysis failed: {}", msg),
            InsightError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for InsightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InsightError {}

impl From<FormError> for InsightError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::NotFound(id) => InsightError::FormNotFound(id),
            FormError::Forbidden => InsightError::Forbidden,
            FormError::ValidationFailed { field, message } => {
                InsightError::ValidationFailed { field, message }
            }
            FormError::GenerationFailed(msg) => InsightError::GenerationFailed(msg),
            other => InsightError::Infrastructure(other.to_string()),
        }
    }
}

impl From<DomainError> for InsightError {
    fn from(err: DomainError) -> Self {
        FormError::from(err).into()
    }
}
