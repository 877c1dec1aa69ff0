//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, ownership and error types
//! that form the vocabulary of the NeuroForm domain.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{FlowSessionId, FormId, QuestionId, ResponseId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
