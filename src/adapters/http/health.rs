//! Liveness endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::ports::FlowSessionStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub active_flow_sessions: usize,
}

/// GET /api/health
async fn health(State(sessions): State<Arc<dyn FlowSessionStore>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        active_flow_sessions: sessions.active_count().await,
    })
}

pub fn health_routes(sessions: Arc<dyn FlowSessionStore>) -> Router {
    Router::new().route("/", get(health)).with_state(sessions)
}
