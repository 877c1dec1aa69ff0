//! HTTP routes for AI endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    adaptive_next, chat, generate_form, generate_insights, generate_summary, get_insights,
    AiHandlers,
};

/// Creates the AI router, mounted at `/api/ai`.
pub fn ai_routes(handlers: AiHandlers) -> Router {
    Router::new()
        .route("/generate-form", post(generate_form))
        .route("/adaptive-next", post(adaptive_next))
        .route(
            "/insights/:form_id",
            get(get_insights).post(generate_insights),
        )
        .route("/summary/:form_id", post(generate_summary))
        .route("/chat", post(chat))
        .with_state(handlers)
}
