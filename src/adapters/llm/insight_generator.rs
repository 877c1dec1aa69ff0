//! LLM-backed InsightGenerator.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::form::Form;
use crate::domain::insight::{Insight, InsightError, InsightPayload};
use crate::domain::response::ResponseRecord;
use crate::ports::{
    AIProvider, CompletionRequest, InsightGenerator, MessageRole, RequestMetadata,
};

use super::json::extract_object;

const ANALYST_PROMPT: &str = "You are a data analyst who reads survey responses and reports \
what they say. Reply with a single JSON object and nothing else.";

const SUMMARY_PROMPT: &str = "You write short executive summaries of survey analyses for busy \
decision makers. Plain prose, no headings, no JSON.";

/// Analyzes responses by prompting the configured AI provider.
pub struct LlmInsightGenerator {
    ai_provider: Arc<dyn AIProvider>,
}

impl LlmInsightGenerator {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self { ai_provider }
    }

    /// One object per response, keyed by question text.
    fn response_data(responses: &[ResponseRecord]) -> Value {
        let rows: Vec<Value> = responses
            .iter()
            .map(|response| {
                let answers: serde_json::Map<String, Value> = response
                    .answers
                    .iter()
                    .map(|a| {
                        let key = if a.question_text.is_empty() {
                            a.question_id.to_string()
                        } else {
                            a.question_text.clone()
                        };
                        (key, json!(a.answer))
                    })
                    .collect();
                Value::Object(answers)
            })
            .collect();
        Value::Array(rows)
    }

    fn analysis_prompt(form: &Form, responses: &[ResponseRecord]) -> String {
        let questions: Vec<Value> = form
            .questions()
            .iter()
            .map(|q| json!({"id": q.id, "type": q.question_type, "question": q.question}))
            .collect();

        format!(
            r#"Form: "{title}"
Questions: {questions}
Responses ({count}): {data}

Respond with:
{{
  "sentimentScore": number between -1 and 1,
  "sentimentLabel": "positive" | "neutral" | "negative",
  "keyThemes": ["theme"],
  "painPoints": ["pain point"],
  "positiveHighlights": ["highlight"],
  "actionableRecommendations": ["recommendation"],
  "executiveSummary": "two or three sentences",
  "questionInsights": [
    {{"questionId": "q1", "questionText": "...", "topAnswers": ["..."], "insight": "..."}}
  ]
}}"#,
            title = form.title(),
            questions = Value::Array(questions),
            count = responses.len(),
            data = Self::response_data(responses),
        )
    }

    fn summary_prompt(form: &Form, insight: &Insight) -> String {
        let payload = &insight.payload;
        format!(
            "Form: \"{}\"\nResponses analyzed: {}\nSentiment: {} ({:.2})\nKey themes: {}\nPain points: {}\nHighlights: {}\nRecommendations: {}\n\nWrite a three to five sentence executive summary.",
            form.title(),
            insight.total_responses,
            payload.sentiment_label.as_str(),
            payload.sentiment_score,
            payload.key_themes.join("; "),
            payload.pain_points.join("; "),
            payload.positive_highlights.join("; "),
            payload.actionable_recommendations.join("; "),
        )
    }
}

#[async_trait]
impl InsightGenerator for LlmInsightGenerator {
    async fn generate_insights(
        &self,
        form: &Form,
        responses: &[ResponseRecord],
    ) -> Result<InsightPayload, InsightError> {
        let request = CompletionRequest::new(RequestMetadata::new(
            "generate_insights",
            Some(form.owner().clone()),
        ))
        .with_system_prompt(ANALYST_PROMPT)
        .with_message(MessageRole::User, Self::analysis_prompt(form, responses));

        let response = self
            .ai_provider
            .complete(request)
            .await
            .map_err(|e| InsightError::generation_failed(e.to_string()))?;

        InsightPayload::parse(extract_object(&response.content))
    }

    async fn write_summary(&self, form: &Form, insight: &Insight) -> Result<String, InsightError> {
        let request = CompletionRequest::new(RequestMetadata::new(
            "write_summary",
            Some(form.owner().clone()),
        ))
        .with_system_prompt(SUMMARY_PROMPT)
        .with_message(MessageRole::User, Self::summary_prompt(form, insight));

        let response = self
            .ai_provider
            .complete(request)
            .await
            .map_err(|e| InsightError::generation_failed(e.to_string()))?;

        Ok(response.content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::flow::{AnswerValue, SubmissionDraft};
    use crate::domain::form::{NewForm, Question, QuestionType};
    use crate::domain::foundation::{FormId, QuestionId, UserId};
    use crate::domain::insight::SentimentLabel;
    use crate::domain::response::AnswerRecord;

    fn form() -> Form {
        Form::create(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            NewForm {
                title: "Onboarding".to_string(),
                questions: vec![Question::new("q1", QuestionType::Rating, "How easy was setup?")],
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn response(form: &Form, score: f64) -> ResponseRecord {
        ResponseRecord::from_draft(
            *form.id(),
            SubmissionDraft {
                answers: vec![AnswerRecord {
                    question_id: QuestionId::from("q1"),
                    question_text: "How easy was setup?".to_string(),
                    answer: AnswerValue::from(score),
                    question_type: QuestionType::Rating,
                }],
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn parses_fenced_payload() {
        let provider = MockAIProvider::new().with_response(
            "Here you go:\n```json\n{\"sentimentScore\": 0.4, \"sentimentLabel\": \"Positive\", \"keyThemes\": [\"speed\"]}\n```",
        );
        let generator = LlmInsightGenerator::new(Arc::new(provider.clone()));
        let form = form();

        let payload = generator
            .generate_insights(&form, &[response(&form, 4.0), response(&form, 5.0)])
            .await
            .unwrap();

        assert_eq!(payload.sentiment_label, SentimentLabel::Positive);
        assert_eq!(payload.key_themes, vec!["speed".to_string()]);

        let calls = provider.get_calls();
        assert_eq!(calls[0].metadata.operation, "generate_insights");
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("Responses (2)"));
        assert!(prompt.contains("How easy was setup?"));
    }

    #[tokio::test]
    async fn prose_only_output_is_malformed() {
        let provider = MockAIProvider::new().with_response("Everyone loved it.");
        let generator = LlmInsightGenerator::new(Arc::new(provider));
        let form = form();

        let err = generator
            .generate_insights(&form, &[response(&form, 4.0)])
            .await
            .unwrap_err();

        assert!(matches!(err, InsightError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_generation_failed() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);
        let generator = LlmInsightGenerator::new(Arc::new(provider));
        let form = form();

        let err = generator
            .generate_insights(&form, &[response(&form, 4.0)])
            .await
            .unwrap_err();

        assert!(matches!(err, InsightError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn summary_is_trimmed_text() {
        let provider = MockAIProvider::new().with_response("  Setup is easy for most.  \n");
        let generator = LlmInsightGenerator::new(Arc::new(provider.clone()));
        let form = form();
        let insight = Insight::new(
            *form.id(),
            2,
            InsightPayload {
                key_themes: vec!["speed".to_string()],
                ..Default::default()
            },
        );

        let summary = generator.write_summary(&form, &insight).await.unwrap();

        assert_eq!(summary, "Setup is easy for most.");
        let prompt = &provider.get_calls()[0].messages[0].content;
        assert!(prompt.contains("Key themes: speed"));
    }
}
