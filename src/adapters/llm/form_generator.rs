//! LLM-backed FormGenerator.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, FormGenerator, GeneratedForm, MessageRole,
    RequestMetadata,
};

use super::json::parse_json;

const SYSTEM_PROMPT: &str = "You design survey forms that collect useful, analyzable answers. \
Reply with a single JSON object and nothing else.";

/// Designs forms by prompting the configured AI provider.
pub struct LlmFormGenerator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmFormGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    fn prompt(goal: &str) -> String {
        format!(
            r#"Design a survey form for this goal: "{goal}"

Respond with JSON shaped like:
{{
  "title": "Form title",
  "description": "What the form collects",
  "questions": [
    {{
      "id": "q1",
      "type": "text | textarea | rating | mcq | scale | yes_no | email | number",
      "question": "Question text",
      "placeholder": "optional",
      "options": ["only for mcq"],
      "required": true,
      "minRating": 1,
      "maxRating": 5,
      "conditionalLogic": {{
        "enabled": false,
        "triggerQuestionId": "",
        "triggerCondition": "",
        "action": "show"
      }}
    }}
  ]
}}

Guidelines:
- Between 6 and 10 questions, general before specific.
- Use rating for satisfaction, mcq for choices and textarea for open answers.
- Where a rating question exists, add a follow-up gated on a low score with
  conditionalLogic.enabled = true and triggerCondition "lte:3".
- Trigger conditions use "lte:<number>", "gte:<number>" or "eq:<text>"."#
        )
    }
}

/// Gives questions without an id a positional one so the form validates.
fn fill_missing_ids(value: &mut Value) {
    let Some(questions) = value.get_mut("questions").and_then(Value::as_array_mut) else {
        return;
    };
    for (index, question) in questions.iter_mut().enumerate() {
        let Some(obj) = question.as_object_mut() else {
            continue;
        };
        let blank = obj
            .get("id")
            .and_then(Value::as_str)
            .map_or(true, |id| id.trim().is_empty());
        if blank {
            obj.insert("id".to_string(), Value::String(format!("q{}", index + 1)));
        }
    }
}

#[async_trait]
impl FormGenerator for LlmFormGenerator {
    async fn generate_form(&self, goal: &str) -> Result<GeneratedForm, AIError> {
        let request = CompletionRequest::new(RequestMetadata::new("generate_form", None))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, Self::prompt(goal));

        let response = self.ai_provider.complete(request).await?;

        let mut value: Value = parse_json(&response.content)?;
        fill_missing_ids(&mut value);
        serde_json::from_value(value)
            .map_err(|e| AIError::parse(format!("generated form has the wrong shape: {}", e)))
    }
}
