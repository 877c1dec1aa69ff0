//! HTTP adapter for AI endpoints: form generation, the stateless follow-up
//! helper, insights and the data assistant.

mod dto;
mod handlers;
mod routes;

pub use dto::{AdaptiveNextRequest, ChatRequest, ChatResponse, GenerateFormRequest};
pub use handlers::AiHandlers;
pub use routes::ai_routes;
