//! LLM-backed FollowUpGenerator.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::flow::FollowUpRequest;
use crate::domain::foundation::QuestionId;
use crate::ports::{
    AIError, AIProvider, CompletionRequest, FollowUpDecision, FollowUpGenerator, MessageRole,
    RequestMetadata,
};

use super::json::parse_json;

const SYSTEM_PROMPT: &str = "You run an adaptive survey. Given the questions and answers so far, \
decide whether one follow-up question would surface something useful. Reply with JSON only.";

/// Prefix for generated follow-up ids.
const FOLLOW_UP_PREFIX: &str = "adaptive_";

/// Asks the AI provider whether to splice in a follow-up.
pub struct LlmFollowUpGenerator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmFollowUpGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn prompt(request: &FollowUpRequest) -> Result<String, AIError> {
        let questions = serde_json::to_string(&request.questions)
            .map_err(|e| AIError::InvalidRequest(e.to_string()))?;
        let answers = serde_json::to_string(&request.answers)
            .map_err(|e| AIError::InvalidRequest(e.to_string()))?;

        Ok(format!(
            r#"Questions: {questions}
Answers so far: {answers}
The respondent just answered question "{current}".

Respond with:
{{
  "shouldAddFollowUp": true or false,
  "followUpQuestion": {{
    "id": "adaptive_1",
    "type": "textarea",
    "question": "Follow-up question text",
    "required": false
  }},
  "reason": "short reason"
}}"#,
            current = request.current_question_id
        ))
    }
}

/// Fills a blank follow-up id with the next free `adaptive_<n>` id.
///
/// An id that is already in the sequence is left as is; the session
/// refuses to splice a follow-up it already holds.
fn fill_blank_id(decision: &mut FollowUpDecision, request: &FollowUpRequest) {
    let Some(question) = decision.follow_up_question.as_mut() else {
        return;
    };
    if !question.id.is_blank() {
        return;
    }
    let taken: HashSet<&str> = request.questions.iter().map(|q| q.id.as_str()).collect();
    let fresh = (1..)
        .map(|n| format!("{}{}", FOLLOW_UP_PREFIX, n))
        .find(|id| !taken.contains(id.as_str()))
        .unwrap_or_default();
    question.id = QuestionId::new(fresh);
}

#[async_trait]
impl FollowUpGenerator for LlmFollowUpGenerator {
    async fn next_follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpDecision, AIError> {
        let completion = CompletionRequest::new(RequestMetadata::new("adaptive_next", None))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, Self::prompt(request)?);

        let response = self.ai_provider.complete(completion).await?;

        let mut decision: FollowUpDecision = parse_json(&response.content)?;
        fill_blank_id(&mut decision, request);
        Ok(decision)
    }
}
