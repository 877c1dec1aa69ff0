//! HTTP routes for hosted respondent flows.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    advance, back, get_state, record_answer, set_contact, start_flow, submit, FlowHandlers,
};

/// Creates the flow router, mounted at `/api/flow`.
pub fn flow_routes(handlers: FlowHandlers) -> Router {
    Router::new()
        .route("/:form_id/sessions", post(start_flow))
        .route("/sessions/:session_id", get(get_state))
        .route("/sessions/:session_id/contact", put(set_contact))
        .route(
            "/sessions/:session_id/answers/:question_id",
            put(record_answer),
        )
        .route("/sessions/:session_id/advance", post(advance))
        .route("/sessions/:session_id/back", post(back))
        .route("/sessions/:session_id/submit", post(submit))
        .with_state(handlers)
}
