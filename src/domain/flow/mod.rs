//! Flow module - the adaptive respondent flow evaluator.
//!
//! Decides, step by step, which question a respondent sees next: questions
//! gated by trigger conditions are suppressed until their condition holds,
//! and AI follow-ups can be spliced in after rating answers.

mod answer;
mod errors;
mod session;
mod visibility;

pub use answer::{AnswerMap, AnswerValue};
pub use errors::FlowError;
pub use session::{
    AdvanceOutcome, FlowPosition, FlowSession, FlowStart, FollowUpRequest, GivenAnswer,
    RespondentContact, SubmissionDraft,
};
pub use visibility::{compute_visibility, VisibilityPolicy};
