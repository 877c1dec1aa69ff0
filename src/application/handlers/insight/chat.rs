//! AssistantChatHandler - Answers an owner's question about their data.

use std::sync::Arc;

use crate::domain::foundation::{FormId, UserId};
use crate::domain::insight::InsightError;
use crate::ports::{AssistantContext, DataAssistant, FormRepository, InsightRepository};

/// Maximum accepted message length.
pub const MAX_CHAT_MESSAGE_LENGTH: usize = 2000;

#[derive(Debug, Clone)]
pub struct AssistantChatCommand {
    pub owner: UserId,
    pub message: String,
}

/// Handler for the data assistant.
///
/// The context is built from the owner's form titles and the summaries,
/// themes and pain points of any insights generated for those forms.
pub struct AssistantChatHandler {
    forms: Arc<dyn FormRepository>,
    insights: Arc<dyn InsightRepository>,
    assistant: Arc<dyn DataAssistant>,
}

impl AssistantChatHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        insights: Arc<dyn InsightRepository>,
        assistant: Arc<dyn DataAssistant>,
    ) -> Self {
        Self {
            forms,
            insights,
            assistant,
        }
    }

    pub async fn handle(&self, cmd: AssistantChatCommand) -> Result<String, InsightError> {
        let message = cmd.message.trim();
        if message.is_empty() {
            return Err(InsightError::validation("message", "Message is required"));
        }
        if message.chars().count() > MAX_CHAT_MESSAGE_LENGTH {
            return Err(InsightError::validation(
                "message",
                format!("Message must be at most {} characters", MAX_CHAT_MESSAGE_LENGTH),
            ));
        }

        let context = self.build_context(&cmd.owner).await?;
        self.assistant
            .answer(message, &context)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "data assistant failed");
                InsightError::generation_failed(e.to_string())
            })
    }

    async fn build_context(&self, owner: &UserId) -> Result<AssistantContext, InsightError> {
        let forms = self.forms.find_by_owner(owner).await?;
        let form_ids: Vec<FormId> = forms.iter().map(|f| *f.id()).collect();
        let insights = self.insights.find_by_forms(&form_ids).await?;

        let mut context = AssistantContext {
            form_titles: forms.iter().map(|f| f.title().to_string()).collect(),
            ..Default::default()
        };
        for insight in insights {
            let payload = insight.payload;
            if let Some(summary) = payload.executive_summary {
                context.summaries.push(summary);
            }
            context.key_themes.extend(payload.key_themes);
            context.pain_points.extend(payload.pain_points);
        }
        Ok(context)
    }
}
