//! Data assistant port: answers owner questions about their forms.

use async_trait::async_trait;

use super::AIError;

/// What the assistant is allowed to know about an owner's data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantContext {
    pub form_titles: Vec<String>,
    pub summaries: Vec<String>,
    pub key_themes: Vec<String>,
    pub pain_points: Vec<String>,
}

impl AssistantContext {
    pub fn is_empty(&self) -> bool {
        self.form_titles.is_empty() && self.summaries.is_empty()
    }
}

#[async_trait]
pub trait DataAssistant: Send + Sync {
    /// Answer `question` using only `context`.
    async fn answer(&self, question: &str, context: &AssistantContext) -> Result<String, AIError>;
}
