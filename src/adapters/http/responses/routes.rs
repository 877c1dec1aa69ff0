//! HTTP routes for response endpoints.

use axum::{routing::post, Router};

use super::handlers::{list_responses, submit_response, ResponseHandlers};

/// Creates the response router, mounted at `/api/responses`.
pub fn response_routes(handlers: ResponseHandlers) -> Router {
    Router::new()
        .route("/:form_id", post(submit_response).get(list_responses))
        .with_state(handlers)
}
