//! HTTP adapter for server-hosted respondent flows.

mod dto;
mod handlers;
mod routes;

pub use dto::{FlowStateView, FlowStep, FlowSubmitResponse, StartFlowRequest};
pub use handlers::FlowHandlers;
pub use routes::flow_routes;
