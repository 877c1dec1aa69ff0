//! HTTP handlers for AI endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::forms::{parse_form_id, FormEnvelope};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::flow::AdaptiveNextHandler;
use crate::application::handlers::form::{GenerateFormCommand, GenerateFormHandler};
use crate::application::handlers::insight::{
    AssistantChatCommand, AssistantChatHandler, GenerateInsightsCommand, GenerateInsightsHandler,
    GenerateSummaryCommand, GenerateSummaryHandler, GetInsightsHandler, GetInsightsQuery,
};
use crate::ports::FollowUpDecision;

use super::dto::{
    AdaptiveNextRequest, ChatRequest, ChatResponse, GenerateFormRequest, InsightEnvelope,
    SummaryResponse,
};

#[derive(Clone)]
pub struct AiHandlers {
    pub generate_form: Arc<GenerateFormHandler>,
    pub adaptive_next: Arc<AdaptiveNextHandler>,
    pub generate_insights: Arc<GenerateInsightsHandler>,
    pub get_insights: Arc<GetInsightsHandler>,
    pub generate_summary: Arc<GenerateSummaryHandler>,
    pub chat: Arc<AssistantChatHandler>,
}

/// POST /api/ai/generate-form - Design and save a form from a goal
pub async fn generate_form(
    State(handlers): State<AiHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<GenerateFormRequest>,
) -> Result<Response, ApiError> {
    let cmd = GenerateFormCommand {
        owner: user.id,
        goal: req.goal,
    };

    let form = handlers.generate_form.handle(cmd).await?;
    tracing::info!(form_id = %form.id(), questions = form.questions().len(), "Generated form");
    Ok((StatusCode::CREATED, Json(FormEnvelope::new(&form))).into_response())
}

/// POST /api/ai/adaptive-next - Stateless follow-up suggestion
pub async fn adaptive_next(
    State(handlers): State<AiHandlers>,
    JsonBody(req): JsonBody<AdaptiveNextRequest>,
) -> Result<Json<FollowUpDecision>, ApiError> {
    let decision = handlers
        .adaptive_next
        .handle(req.into_follow_up_request())
        .await?;
    Ok(Json(decision))
}

/// POST /api/ai/insights/:formId - Analyze all responses to a form
pub async fn generate_insights(
    State(handlers): State<AiHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Result<Json<InsightEnvelope>, ApiError> {
    let cmd = GenerateInsightsCommand {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
    };

    let insight = handlers.generate_insights.handle(cmd).await?;
    Ok(Json(InsightEnvelope { insight }))
}

/// GET /api/ai/insights/:formId - Latest stored insight
pub async fn get_insights(
    State(handlers): State<AiHandlers>,
    Path(form_id): Path<String>,
) -> Result<Json<InsightEnvelope>, ApiError> {
    let query = GetInsightsQuery {
        form_id: parse_form_id(&form_id)?,
    };

    let insight = handlers.get_insights.handle(query).await?;
    Ok(Json(InsightEnvelope { insight }))
}

/// POST /api/ai/summary/:formId - Rewrite the executive summary
pub async fn generate_summary(
    State(handlers): State<AiHandlers>,
    RequireAuth(user): RequireAuth,
    Path(form_id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let cmd = GenerateSummaryCommand {
        owner: user.id,
        form_id: parse_form_id(&form_id)?,
    };

    let insight = handlers.generate_summary.handle(cmd).await?;
    let summary = insight.payload.executive_summary.clone().unwrap_or_default();
    Ok(Json(SummaryResponse { summary, insight }))
}

/// POST /api/ai/chat - Ask the data assistant about your forms
pub async fn chat(
    State(handlers): State<AiHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let cmd = AssistantChatCommand {
        owner: user.id,
        message: req.message,
    };

    let answer = handlers.chat.handle(cmd).await?;
    Ok(Json(ChatResponse { answer }))
}
