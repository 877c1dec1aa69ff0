//! HTTP routes for form endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_form, delete_form, get_form, list_forms, toggle_publish, update_form, FormHandlers,
};

/// Creates the form router, mounted at `/api/forms`.
pub fn form_routes(handlers: FormHandlers) -> Router {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/:id/publish", post(toggle_publish))
        .with_state(handlers)
}
