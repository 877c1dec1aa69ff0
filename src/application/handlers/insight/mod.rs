//! Insight and data assistant handlers.

mod chat;
mod generate_insights;
mod generate_summary;
mod get_insights;

pub use chat::{AssistantChatCommand, AssistantChatHandler, MAX_CHAT_MESSAGE_LENGTH};
pub use generate_insights::{GenerateInsightsCommand, GenerateInsightsHandler};
pub use generate_summary::{GenerateSummaryCommand, GenerateSummaryHandler};
pub use get_insights::{GetInsightsHandler, GetInsightsQuery};
