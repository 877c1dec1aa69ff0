//! HTTP adapter for response endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ResponseListResponse, SubmitResponseRequest, SubmitResponseResponse};
pub use handlers::ResponseHandlers;
pub(crate) use handlers::user_agent;
pub use routes::response_routes;
