//! JSON error bodies and status mapping shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::flow::FlowError;
use crate::domain::form::FormError;
use crate::domain::foundation::{AuthError, ErrorCode};
use crate::domain::insight::InsightError;
use crate::ports::AIError;

/// Error body: `{code, message, details?}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized.to_string(), message)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::NoResponses => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden | ErrorCode::FormNotPublished => StatusCode::FORBIDDEN,
        ErrorCode::FormNotFound
        | ErrorCode::ResponseNotFound
        | ErrorCode::InsightNotFound
        | ErrorCode::FlowSessionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::AIProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error returned from handlers; renders as status + `ErrorResponse`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ErrorResponse::bad_request(message))
    }

    fn from_code(code: ErrorCode, message: String) -> Self {
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(code = %code, "{}", message);
        }
        Self::new(status, ErrorResponse::new(code.to_string(), message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        let details = match &err {
            FormError::ValidationFailed { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };
        let mut api = Self::from_code(err.code(), err.message());
        api.body.details = details;
        api
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        let details = match &err {
            FlowError::AnswerRequired(id)
            | FlowError::UnknownQuestion(id)
            | FlowError::QuestionSuppressed(id) => {
                Some(serde_json::json!({ "questionId": id }))
            }
            _ => None,
        };
        let mut api = Self::from_code(err.code(), err.message());
        api.body.details = details;
        api
    }
}

impl From<InsightError> for ApiError {
    fn from(err: InsightError) -> Self {
        Self::from_code(err.code(), err.message())
    }
}

impl From<AIError> for ApiError {
    fn from(err: AIError) -> Self {
        match err {
            AIError::InvalidRequest(message) => Self::new(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message),
            ),
            other => {
                tracing::warn!(error = %other, "AI provider call failed");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(
                        ErrorCode::AIProviderError.to_string(),
                        format!("AI request failed: {}", other),
                    ),
                )
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!("Auth service unavailable: {}", msg);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        ErrorCode::InternalError.to_string(),
                        "Authentication service unavailable",
                    ),
                )
            }
            AuthError::TokenExpired => Self::new(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized("Token expired"),
            ),
            AuthError::InvalidToken => Self::new(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized("Invalid token"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FlowSessionId, FormId, QuestionId};

    #[test]
    fn status_mapping_covers_categories() {
        assert_eq!(status_for(ErrorCode::ValidationFailed), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::FormNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::FormNotPublished), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(ErrorCode::InvalidStateTransition),
            StatusCode::CONFLICT
        );
        assert_eq!(status_for(ErrorCode::AIProviderError), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(ErrorCode::DatabaseError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unpublished_form_is_forbidden() {
        let err: ApiError = FormError::not_accepting_responses(FormId::new()).into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, "FORM_NOT_PUBLISHED");
    }

    #[test]
    fn missing_answer_carries_question_id() {
        let err: ApiError = FlowError::AnswerRequired(QuestionId::from("q2")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body.details, Some(serde_json::json!({"questionId": "q2"})));
    }

    #[test]
    fn flow_state_errors_conflict() {
        let err: ApiError = FlowError::NotComplete.into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
        let err: ApiError = FlowError::SessionNotFound(FlowSessionId::new()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn ai_errors_are_bad_gateway() {
        let err: ApiError = AIError::Timeout { timeout_secs: 5 }.into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        let err: ApiError = AIError::InvalidRequest("no questions".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn auth_errors_are_unauthorized() {
        let err: ApiError = AuthError::TokenExpired.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
