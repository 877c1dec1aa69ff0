//! HTTP handlers for response endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::forms::parse_form_id;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::response::{
    ListResponsesHandler, ListResponsesQuery, SubmitResponseCommand, SubmitResponseHandler,
};
use crate::domain::flow::SubmissionDraft;

use super::dto::{ResponseListResponse, SubmitResponseRequest, SubmitResponseResponse};

#[derive(Clone)]
pub struct ResponseHandlers {
    pub submit: Arc<SubmitResponseHandler>,
    pub list: Arc<ListResponsesHandler>,
}

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// POST /api/responses/:formId - Public submission to a published form
pub async fn submit_response(
    State(handlers): State<ResponseHandlers>,
    Path(form_id): Path<String>,
    headers: HeaderMap,
    JsonBody(req): JsonBody<SubmitResponseRequest>,
) -> Result<Response, ApiError> {
    let form_id = parse_form_id(&form_id)?;
    let draft = SubmissionDraft {
        session_id: req.session_id,
        answers: req.answers,
        respondent_name: req.respondent_name,
        respondent_email: req.respondent_email,
        user_agent: req.metadata.user_agent.or_else(|| user_agent(&headers)),
        time_spent_seconds: req.metadata.time_spent_seconds,
    };

    let record = handlers
        .submit
        .handle(SubmitResponseCommand { form_id, draft })
        .await?;

    let body = SubmitResponseResponse {
        message: "Response submitted successfully".to_string(),
        response_id: record.id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// GET /api/responses/:formId - Owner's view of all submissions
pub async fn list_responses(
    State(handlers): State<ResponseHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Result<Json<ResponseListResponse>, ApiError> {
    let query = ListResponsesQuery {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
    };

    let list = handlers.list.handle(query).await?;
    Ok(Json(ResponseListResponse {
        responses: list.responses,
        total: list.total,
    }))
}
