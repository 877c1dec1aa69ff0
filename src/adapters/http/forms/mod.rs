//! HTTP adapter for form endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateFormRequest, FormEnvelope, FormListResponse, FormView, MessageResponse};
pub use handlers::FormHandlers;
pub(crate) use handlers::parse_form_id;
pub use routes::form_routes;
