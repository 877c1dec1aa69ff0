//! Prompt-level AI features built on an `AIProvider`.
//!
//! Each adapter owns its prompt and turns the model's text into a domain
//! value. Model output is tolerated inside Markdown code fences or with
//! surrounding prose.

mod data_assistant;
mod follow_up_generator;
mod form_generator;
mod insight_generator;
mod json;

pub use data_assistant::LlmDataAssistant;
pub use follow_up_generator::LlmFollowUpGenerator;
pub use form_generator::LlmFormGenerator;
pub use insight_generator::LlmInsightGenerator;
pub use json::{extract_object, parse_json, strip_code_fences};
