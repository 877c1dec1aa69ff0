//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod flow;
pub mod form;
pub mod insight;
pub mod response;
