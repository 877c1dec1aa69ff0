//! HTTP adapters - REST API implementations.
//!
//! Each area (forms, responses, AI, flows) has its own DTOs, handlers and
//! routes; `api_router` mounts them all under `/api`.

pub mod ai;
pub mod error;
pub mod extract;
pub mod flow;
pub mod forms;
pub mod health;
pub mod middleware;
pub mod responses;
mod router;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_router, ApiDependencies};
