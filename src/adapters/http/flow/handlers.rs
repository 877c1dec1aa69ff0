//! HTTP handlers for hosted respondent flows.
//!
//! All flow endpoints are public: the session id is the respondent's
//! capability for their own session.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::forms::parse_form_id;
use crate::adapters::http::responses::user_agent;
use crate::application::handlers::flow::{
    AdvanceFlowCommand, AdvanceFlowHandler, GetFlowStateHandler, GetFlowStateQuery,
    GoBackCommand, GoBackHandler, RecordAnswerCommand, RecordAnswerHandler, SetContactCommand,
    SetContactHandler, StartFlowCommand, StartFlowHandler, SubmitFlowCommand, SubmitFlowHandler,
};
use crate::domain::foundation::{FlowSessionId, QuestionId};

use super::dto::{
    FlowStateView, FlowSubmitResponse, RecordAnswerRequest, SetContactRequest, StartFlowRequest,
};

#[derive(Clone)]
pub struct FlowHandlers {
    pub start: Arc<StartFlowHandler>,
    pub state: Arc<GetFlowStateHandler>,
    pub set_contact: Arc<SetContactHandler>,
    pub record_answer: Arc<RecordAnswerHandler>,
    pub advance: Arc<AdvanceFlowHandler>,
    pub back: Arc<GoBackHandler>,
    pub submit: Arc<SubmitFlowHandler>,
}

fn parse_session_id(raw: &str) -> Result<FlowSessionId, ApiError> {
    raw.parse::<FlowSessionId>()
        .map_err(|_| ApiError::bad_request("Invalid session ID"))
}

/// POST /api/flow/:formId/sessions - Start a flow on a published form
pub async fn start_flow(
    State(handlers): State<FlowHandlers>,
    Path(form_id): Path<String>,
    headers: HeaderMap,
    body: Option<JsonBody<StartFlowRequest>>,
) -> Result<Response, ApiError> {
    let req = body.map(|JsonBody(req)| req).unwrap_or_default();
    let cmd = StartFlowCommand {
        form_id: parse_form_id(&form_id)?,
        contact: req.contact,
        client_session_id: req.session_id,
        user_agent: user_agent(&headers),
    };

    let snapshot = handlers.start.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(FlowStateView::from(snapshot))).into_response())
}

/// GET /api/flow/sessions/:sessionId - Current state
pub async fn get_state(
    State(handlers): State<FlowHandlers>,
    Path(session_id): Path<String>,
) -> Result<Json<FlowStateView>, ApiError> {
    let query = GetFlowStateQuery {
        session_id: parse_session_id(&session_id)?,
    };
    let snapshot = handlers.state.handle(query).await?;
    Ok(Json(snapshot.into()))
}

/// PUT /api/flow/sessions/:sessionId/contact - Name and email for the intro step
pub async fn set_contact(
    State(handlers): State<FlowHandlers>,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<SetContactRequest>,
) -> Result<Json<FlowStateView>, ApiError> {
    let cmd = SetContactCommand {
        session_id: parse_session_id(&session_id)?,
        name: req.name,
        email: req.email,
    };
    let snapshot = handlers.set_contact.handle(cmd).await?;
    Ok(Json(snapshot.into()))
}

/// PUT /api/flow/sessions/:sessionId/answers/:questionId - Record an answer
pub async fn record_answer(
    State(handlers): State<FlowHandlers>,
    Path((session_id, question_id)): Path<(String, String)>,
    JsonBody(req): JsonBody<RecordAnswerRequest>,
) -> Result<Json<FlowStateView>, ApiError> {
    let cmd = RecordAnswerCommand {
        session_id: parse_session_id(&session_id)?,
        question_id: QuestionId::new(question_id),
        value: req.answer,
    };
    let snapshot = handlers.record_answer.handle(cmd).await?;
    Ok(Json(snapshot.into()))
}

/// POST /api/flow/sessions/:sessionId/advance - Move forward, maybe adding a follow-up
pub async fn advance(
    State(handlers): State<FlowHandlers>,
    Path(session_id): Path<String>,
) -> Result<Json<FlowStateView>, ApiError> {
    let cmd = AdvanceFlowCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let result = handlers.advance.handle(cmd).await?;
    Ok(Json(
        FlowStateView::from(result.snapshot).with_follow_up(result.follow_up_added),
    ))
}

/// POST /api/flow/sessions/:sessionId/back - Previous visible step
pub async fn back(
    State(handlers): State<FlowHandlers>,
    Path(session_id): Path<String>,
) -> Result<Json<FlowStateView>, ApiError> {
    let cmd = GoBackCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let snapshot = handlers.back.handle(cmd).await?;
    Ok(Json(snapshot.into()))
}

/// POST /api/flow/sessions/:sessionId/submit - Store the response and end the session
pub async fn submit(
    State(handlers): State<FlowHandlers>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    let cmd = SubmitFlowCommand {
        session_id: parse_session_id(&session_id)?,
    };
    let record = handlers.submit.handle(cmd).await?;
    let body = FlowSubmitResponse {
        message: "Response submitted successfully".to_string(),
        response_id: record.id.to_string(),
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
