//! Assembles the `/api` router from ports.
//!
//! Application handlers are built once here and shared by the per-area
//! routers. The auth middleware wraps everything; owner-only endpoints
//! enforce it with `RequireAuth`.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};

use crate::application::handlers::flow::{
    AdaptiveNextHandler, AdvanceFlowHandler, GetFlowStateHandler, GoBackHandler,
    RecordAnswerHandler, SetContactHandler, StartFlowHandler, SubmitFlowHandler,
};
use crate::application::handlers::form::{
    CreateFormHandler, DeleteFormHandler, GenerateFormHandler, GetFormHandler, ListFormsHandler,
    TogglePublishHandler, UpdateFormHandler,
};
use crate::application::handlers::insight::{
    AssistantChatHandler, GenerateInsightsHandler, GenerateSummaryHandler, GetInsightsHandler,
};
use crate::application::handlers::response::{ListResponsesHandler, SubmitResponseHandler};
use crate::domain::flow::VisibilityPolicy;
use crate::ports::{
    DataAssistant, FlowSessionStore, FollowUpGenerator, FormGenerator, FormRepository,
    InsightGenerator, InsightRepository, ResponseRepository, SessionValidator,
};

use super::ai::{ai_routes, AiHandlers};
use super::flow::{flow_routes, FlowHandlers};
use super::forms::{form_routes, FormHandlers};
use super::health::health_routes;
use super::middleware::auth_middleware;
use super::responses::{response_routes, ResponseHandlers};

/// Everything the HTTP surface needs from the outside world.
#[derive(Clone)]
pub struct ApiDependencies {
    pub forms: Arc<dyn FormRepository>,
    pub responses: Arc<dyn ResponseRepository>,
    pub insights: Arc<dyn InsightRepository>,
    pub flow_sessions: Arc<dyn FlowSessionStore>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub form_generator: Arc<dyn FormGenerator>,
    pub follow_up_generator: Arc<dyn FollowUpGenerator>,
    pub insight_generator: Arc<dyn InsightGenerator>,
    pub data_assistant: Arc<dyn DataAssistant>,
    pub follow_up_timeout: Duration,
    pub visibility: VisibilityPolicy,
}

/// Builds the router serving every `/api` endpoint.
pub fn api_router(deps: ApiDependencies) -> Router {
    let submit_response = Arc::new(SubmitResponseHandler::new(
        deps.forms.clone(),
        deps.responses.clone(),
    ));

    let form_handlers = FormHandlers {
        create: Arc::new(CreateFormHandler::new(deps.forms.clone())),
        list: Arc::new(ListFormsHandler::new(deps.forms.clone())),
        get: Arc::new(GetFormHandler::new(deps.forms.clone())),
        update: Arc::new(UpdateFormHandler::new(deps.forms.clone())),
        delete: Arc::new(DeleteFormHandler::new(deps.forms.clone())),
        toggle_publish: Arc::new(TogglePublishHandler::new(deps.forms.clone())),
    };

    let response_handlers = ResponseHandlers {
        submit: submit_response.clone(),
        list: Arc::new(ListResponsesHandler::new(
            deps.forms.clone(),
            deps.responses.clone(),
        )),
    };

    let ai_handlers = AiHandlers {
        generate_form: Arc::new(GenerateFormHandler::new(
            deps.form_generator.clone(),
            deps.forms.clone(),
        )),
        adaptive_next: Arc::new(AdaptiveNextHandler::new(deps.follow_up_generator.clone())),
        generate_insights: Arc::new(GenerateInsightsHandler::new(
            deps.forms.clone(),
            deps.responses.clone(),
            deps.insights.clone(),
            deps.insight_generator.clone(),
        )),
        get_insights: Arc::new(GetInsightsHandler::new(deps.insights.clone())),
        generate_summary: Arc::new(GenerateSummaryHandler::new(
            deps.forms.clone(),
            deps.insights.clone(),
            deps.insight_generator.clone(),
        )),
        chat: Arc::new(AssistantChatHandler::new(
            deps.forms.clone(),
            deps.insights.clone(),
            deps.data_assistant.clone(),
        )),
    };

    let flow_handlers = FlowHandlers {
        start: Arc::new(StartFlowHandler::new(
            deps.forms.clone(),
            deps.flow_sessions.clone(),
            deps.visibility,
        )),
        state: Arc::new(GetFlowStateHandler::new(deps.flow_sessions.clone())),
        set_contact: Arc::new(SetContactHandler::new(deps.flow_sessions.clone())),
        record_answer: Arc::new(RecordAnswerHandler::new(deps.flow_sessions.clone())),
        advance: Arc::new(AdvanceFlowHandler::new(
            deps.flow_sessions.clone(),
            deps.follow_up_generator.clone(),
            deps.follow_up_timeout,
        )),
        back: Arc::new(GoBackHandler::new(deps.flow_sessions.clone())),
        submit: Arc::new(SubmitFlowHandler::new(
            deps.flow_sessions.clone(),
            submit_response,
        )),
    };

    Router::new()
        .nest("/api/health", health_routes(deps.flow_sessions.clone()))
        .nest("/api/forms", form_routes(form_handlers))
        .nest("/api/responses", response_routes(response_handlers))
        .nest("/api/ai", ai_routes(ai_handlers))
        .nest("/api/flow", flow_routes(flow_handlers))
        .layer(middleware::from_fn_with_state(
            deps.session_validator,
            auth_middleware,
        ))
}
