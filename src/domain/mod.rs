//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `form` - Form aggregate, questions and trigger conditions
//! - `flow` - Adaptive respondent flow evaluator
//! - `response` - Submitted responses
//! - `insight` - AI-generated response analysis

pub mod flow;
pub mod form;
pub mod foundation;
pub mod insight;
pub mod response;
