//! Insight module - AI analysis of collected responses.

mod aggregate;
mod errors;

pub use aggregate::{Insight, InsightPayload, QuestionInsight, SentimentLabel};
pub use errors::InsightError;
