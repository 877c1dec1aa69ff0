//! LLM-backed DataAssistant.

use std::sync::Arc;

use async_trait::async_trait;

use crate::ports::{
    AIError, AIProvider, AssistantContext, CompletionRequest, DataAssistant, MessageRole,
    RequestMetadata,
};

const SYSTEM_PROMPT: &str = "You are NeuroForm AI, an assistant that helps form owners \
understand their survey data. Answer from the context you are given, say so when the data \
does not cover the question, and keep answers under 200 words.";

/// Answers free-form questions about a user's forms.
pub struct LlmDataAssistant {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmDataAssistant {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn context_block(context: &AssistantContext) -> String {
        if context.is_empty() {
            return "The user has no forms with analyzed responses yet.".to_string();
        }
        let section = |label: &str, items: &[String]| -> String {
            if items.is_empty() {
                format!("{}: none", label)
            } else {
                format!("{}:\n- {}", label, items.join("\n- "))
            }
        };
        [
            section("Forms", &context.form_titles),
            section("Summaries", &context.summaries),
            section("Key themes", &context.key_themes),
            section("Pain points", &context.pain_points),
        ]
        .join("\n\n")
    }
}

#[async_trait]
impl DataAssistant for LlmDataAssistant {
    async fn answer(&self, question: &str, context: &AssistantContext) -> Result<String, AIError> {
        let prompt = format!(
            "Context:\n{}\n\nQuestion: {}",
            Self::context_block(context),
            question
        );
        let request = CompletionRequest::new(RequestMetadata::new("chat", None))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt);

        let response = self.ai_provider.complete(request).await?;
        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;

    #[tokio::test]
    async fn includes_context_in_prompt() {
        let provider = MockAIProvider::new().with_response("Pricing comes up most. ");
        let assistant = LlmDataAssistant::new(Arc::new(provider.clone()));
        let context = AssistantContext {
            form_titles: vec!["Churn survey".to_string()],
            pain_points: vec!["pricing".to_string()],
            ..Default::default()
        };

        let reply = assistant.answer("What hurts most?", &context).await.unwrap();

        assert_eq!(reply, "Pricing comes up most.");
        let call = &provider.get_calls()[0];
        assert_eq!(call.metadata.operation, "chat");
        assert!(call.messages[0].content.contains("- Churn survey"));
        assert!(call.messages[0].content.contains("Summaries: none"));
        assert!(call.messages[0].content.ends_with("Question: What hurts most?"));
    }

    #[tokio::test]
    async fn empty_context_is_stated() {
        let provider = MockAIProvider::new().with_response("No data yet.");
        let assistant = LlmDataAssistant::new(Arc::new(provider.clone()));

        assistant
            .answer("Anything?", &AssistantContext::default())
            .await
            .unwrap();

        assert!(provider.get_calls()[0].messages[0]
            .content
            .contains("no forms with analyzed responses"));
    }
}
