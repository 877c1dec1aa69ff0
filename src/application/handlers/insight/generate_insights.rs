//! GenerateInsightsHandler - Runs LLM analysis over a form's responses.

use std::sync::Arc;

use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::domain::insight::{Insight, InsightError};
use crate::ports::{FormRepository, InsightGenerator, InsightRepository, ResponseRepository};

#[derive(Debug, Clone)]
pub struct GenerateInsightsCommand {
    pub owner: UserId,
    pub form_id: FormId,
}

/// Handler for insight generation.
///
/// Needs at least one response. The result replaces any earlier insight for
/// the form.
pub struct GenerateInsightsHandler {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
    insights: Arc<dyn InsightRepository>,
    generator: Arc<dyn InsightGenerator>,
}

impl GenerateInsightsHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        responses: Arc<dyn ResponseRepository>,
        insights: Arc<dyn InsightRepository>,
        generator: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            forms,
            responses,
            insights,
            generator,
        }
    }

    pub async fn handle(&self, cmd: GenerateInsightsCommand) -> Result<Insight, InsightError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(InsightError::FormNotFound(cmd.form_id))?;
        form.check_ownership(&cmd.owner)?;

        let responses = self.responses.find_by_form(&cmd.form_id).await?;
        if responses.is_empty() {
            return Err(InsightError::NoResponses(cmd.form_id));
        }

        let payload = self
            .generator
            .generate_insights(&form, &responses)
            .await
            .map_err(|e| {
                tracing::warn!(form_id = %cmd.form_id, error = %e, "insight generation failed");
                e
            })?;

        let insight = Insight::new(cmd.form_id, responses.len() as u64, payload);
        self.insights.upsert(&insight).await?;
        tracing::info!(
            form_id = %cmd.form_id,
            total_responses = insight.total_responses,
            sentiment = insight.payload.sentiment_label.as_str(),
            "insights generated"
        );

        Ok(insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::flow::SubmissionDraft;
    use crate::domain::form::{Form, NewForm};
    use crate::domain::insight::{InsightPayload, SentimentLabel};
    use crate::domain::response::ResponseRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockInsightGenerator {
        payload: Result<InsightPayload, InsightError>,
        calls: Mutex<Vec<usize>>,
    }

    impl MockInsightGenerator {
        fn returning(payload: Result<InsightPayload, InsightError>) -> Self {
            Self {
                payload,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InsightGenerator for MockInsightGenerator {
        async fn generate_insights(
            &self,
            _form: &Form,
            responses: &[ResponseRecord],
        ) -> Result<InsightPayload, InsightError> {
            self.calls.lock().unwrap().push(responses.len());
            self.payload.clone()
        }

        async fn write_summary(&self, _form: &Form, _insight: &Insight) -> Result<String, InsightError> {
            Ok(String::new())
        }
    }

    fn payload() -> InsightPayload {
        InsightPayload {
            sentiment_score: 0.6,
            sentiment_label: SentimentLabel::Positive,
            key_themes: vec!["speed".to_string()],
            ..Default::default()
        }
    }

    async fn seeded(responses: usize) -> (Arc<InMemoryStore>, Form) {
        let store = Arc::new(InMemoryStore::new());
        let mut form = Form::create(
            FormId::new(),
            UserId::new("owner-1").unwrap(),
            NewForm {
                title: "Feedback".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        form.toggle_publish();
        store.save(&form).await.unwrap();
        for _ in 0..responses {
            store
                .append(&ResponseRecord::from_draft(*form.id(), SubmissionDraft::default()))
                .await
                .unwrap();
        }
        (store, form)
    }

    fn handler(store: &Arc<InMemoryStore>, generator: Arc<MockInsightGenerator>) -> GenerateInsightsHandler {
        GenerateInsightsHandler::new(store.clone(), store.clone(), store.clone(), generator)
    }

    fn command(form: &Form) -> GenerateInsightsCommand {
        GenerateInsightsCommand {
            owner: UserId::new("owner-1").unwrap(),
            form_id: *form.id(),
        }
    }

    #[tokio::test]
    async fn generates_and_stores_insight() {
        let (store, form) = seeded(3).await;
        let generator = Arc::new(MockInsightGenerator::returning(Ok(payload())));

        let insight = handler(&store, generator.clone())
            .handle(command(&form))
            .await
            .unwrap();

        assert_eq!(insight.total_responses, 3);
        assert_eq!(insight.payload.key_themes, vec!["speed".to_string()]);
        assert_eq!(generator.call_count(), 1);
        assert!(store.has_insight(form.id()).await);
    }

    #[tokio::test]
    async fn requires_at_least_one_response() {
        let (store, form) = seeded(0).await;
        let generator = Arc::new(MockInsightGenerator::returning(Ok(payload())));

        let result = handler(&store, generator.clone()).handle(command(&form)).await;

        assert_eq!(result.unwrap_err(), InsightError::NoResponses(*form.id()));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn malformed_payload_is_not_stored() {
        let (store, form) = seeded(1).await;
        let generator = Arc::new(MockInsightGenerator::returning(Err(InsightError::malformed(
            "not json",
        ))));

        let result = handler(&store, generator).handle(command(&form)).await;

        assert!(matches!(result, Err(InsightError::MalformedPayload(_))));
        assert!(!store.has_insight(form.id()).await);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let (store, form) = seeded(1).await;
        let generator = Arc::new(MockInsightGenerator::returning(Ok(payload())));

        let result = handler(&store, generator)
            .handle(GenerateInsightsCommand {
                owner: UserId::new("intruder").unwrap(),
                form_id: *form.id(),
            })
            .await;

        assert_eq!(result.unwrap_err(), InsightError::Forbidden);
    }
}
