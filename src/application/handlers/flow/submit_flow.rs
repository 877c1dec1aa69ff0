//! SubmitFlowHandler - Turns a completed flow into a stored response.

use std::sync::Arc;

use crate::application::handlers::response::{SubmitResponseCommand, SubmitResponseHandler};
use crate::domain::flow::FlowError;
use crate::domain::foundation::FlowSessionId;
use crate::domain::response::ResponseRecord;
use crate::ports::FlowSessionStore;

use super::load_session;

#[derive(Debug, Clone)]
pub struct SubmitFlowCommand {
    pub session_id: FlowSessionId,
}

/// Handler for flow submission. The session is discarded once the response
/// is stored.
pub struct SubmitFlowHandler {
    sessions: Arc<dyn FlowSessionStore>,
    submitter: Arc<SubmitResponseHandler>,
}

impl SubmitFlowHandler {
    pub fn new(sessions: Arc<dyn FlowSessionStore>, submitter: Arc<SubmitResponseHandler>) -> Self {
        Self {
            sessions,
            submitter,
        }
    }

    pub async fn handle(&self, cmd: SubmitFlowCommand) -> Result<ResponseRecord, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &cmd.session_id).await?;
        let session = shared.lock().await;

        // A concurrent submit may have finished while this one waited.
        if self.sessions.get(&cmd.session_id).await.is_none() {
            return Err(FlowError::SessionNotFound(cmd.session_id));
        }

        let draft = session.to_submission()?;
        let record = self
            .submitter
            .handle(SubmitResponseCommand {
                form_id: *session.form_id(),
                draft,
            })
            .await?;

        self.sessions.remove(&cmd.session_id).await;
        tracing::debug!(session_id = %cmd.session_id, response_id = %record.id, "flow submitted");

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryFlowSessionStore, InMemoryStore};
    use crate::application::handlers::flow::test_support::{published_form, stores};
    use crate::application::handlers::flow::{
        AdvanceFlowCommand, AdvanceFlowHandler, GoBackCommand, GoBackHandler,
        RecordAnswerCommand, RecordAnswerHandler, StartFlowCommand, StartFlowHandler,
    };
    use crate::domain::flow::{AnswerValue, FollowUpRequest, RespondentContact, VisibilityPolicy};
    use crate::domain::form::Form;
    use crate::domain::foundation::QuestionId;
    use crate::ports::{AIError, FollowUpDecision, FollowUpGenerator, FormRepository};
    use async_trait::async_trait;
    use std::time::Duration;

    struct NoFollowUps;

    #[async_trait]
    impl FollowUpGenerator for NoFollowUps {
        async fn next_follow_up(
            &self,
            _request: &FollowUpRequest,
        ) -> Result<FollowUpDecision, AIError> {
            Ok(FollowUpDecision::none())
        }
    }

    struct Flow {
        store: Arc<InMemoryStore>,
        sessions: Arc<InMemoryFlowSessionStore>,
        form: Form,
        session_id: FlowSessionId,
    }

    impl Flow {
        async fn start() -> Self {
            let (store, sessions) = stores();
            let form = published_form(&store).await;
            let started = StartFlowHandler::new(
                store.clone(),
                sessions.clone(),
                VisibilityPolicy::default(),
            )
            .handle(StartFlowCommand {
                form_id: *form.id(),
                contact: Some(RespondentContact::new("Ada", "ada@example.com")),
                client_session_id: Some("client-1".to_string()),
                user_agent: Some("test-agent".to_string()),
            })
            .await
            .unwrap();
            Self {
                store,
                sessions,
                form,
                session_id: started.session_id,
            }
        }

        async fn answer(&self, id: &str, value: AnswerValue) {
            RecordAnswerHandler::new(self.sessions.clone())
                .handle(RecordAnswerCommand {
                    session_id: self.session_id,
                    question_id: QuestionId::from(id),
                    value,
                })
                .await
                .unwrap();
        }

        async fn advance(&self) {
            AdvanceFlowHandler::new(
                self.sessions.clone(),
                Arc::new(NoFollowUps),
                Duration::from_millis(50),
            )
            .handle(AdvanceFlowCommand {
                session_id: self.session_id,
            })
            .await
            .unwrap();
        }

        async fn back(&self) {
            GoBackHandler::new(self.sessions.clone())
                .handle(GoBackCommand {
                    session_id: self.session_id,
                })
                .await
                .unwrap();
        }

        fn handler(&self) -> SubmitFlowHandler {
            SubmitFlowHandler::new(
                self.sessions.clone(),
                Arc::new(SubmitResponseHandler::new(
                    self.store.clone(),
                    self.store.clone(),
                )),
            )
        }

        async fn submit(&self) -> Result<ResponseRecord, FlowError> {
            self.handler()
                .handle(SubmitFlowCommand {
                    session_id: self.session_id,
                })
                .await
        }
    }

    #[tokio::test]
    async fn completed_flow_is_stored_and_discarded() {
        let flow = Flow::start().await;
        flow.advance().await;
        flow.answer("q1", AnswerValue::from(5.0)).await;
        flow.advance().await;
        flow.advance().await;

        let record = flow.submit().await.unwrap();

        let ids: Vec<&str> = record.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1"]);
        assert_eq!(record.session_id, "client-1");
        assert_eq!(record.respondent_name.as_deref(), Some("Ada"));
        assert_eq!(record.metadata.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(flow.sessions.active_count().await, 0);
        let stored = flow.store.find_by_id(flow.form.id()).await.unwrap().unwrap();
        assert_eq!(stored.response_count(), 1);
    }

    #[tokio::test]
    async fn submit_before_completion_is_rejected() {
        let flow = Flow::start().await;
        flow.advance().await;

        let result = flow.submit().await;

        assert_eq!(result.unwrap_err(), FlowError::NotComplete);
        assert_eq!(flow.sessions.active_count().await, 1);
    }

    #[tokio::test]
    async fn second_submit_finds_no_session() {
        let flow = Flow::start().await;
        flow.advance().await;
        flow.answer("q1", AnswerValue::from(5.0)).await;
        flow.advance().await;
        flow.advance().await;
        flow.submit().await.unwrap();

        let again = flow.submit().await;

        assert_eq!(again.unwrap_err(), FlowError::SessionNotFound(flow.session_id));
        assert_eq!(flow.store.response_count(flow.form.id()).await, 1);
    }

    #[tokio::test]
    async fn late_edit_revealing_required_question_blocks_submission() {
        let flow = Flow::start().await;
        flow.advance().await;
        flow.answer("q1", AnswerValue::from(5.0)).await;
        flow.advance().await;
        flow.advance().await;
        // Lowering q1 after completion reveals the required q2.
        flow.answer("q1", AnswerValue::from(1.0)).await;

        let result = flow.submit().await;

        assert_eq!(
            result.unwrap_err(),
            FlowError::AnswerRequired(QuestionId::from("q2"))
        );

        flow.back().await;
        flow.back().await;
        flow.answer("q2", AnswerValue::text("Card declined")).await;
        flow.advance().await;
        flow.advance().await;
        let record = flow.submit().await.unwrap();
        let ids: Vec<&str> = record.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }

    #[tokio::test]
    async fn unpublishing_mid_flow_blocks_submission() {
        let flow = Flow::start().await;
        flow.advance().await;
        flow.answer("q1", AnswerValue::from(5.0)).await;
        flow.advance().await;
        flow.advance().await;
        let mut form = flow.form.clone();
        form.toggle_publish();
        flow.store.update(&form).await.unwrap();

        let result = flow.submit().await;

        assert_eq!(
            result.unwrap_err(),
            FlowError::NotAcceptingResponses(*flow.form.id())
        );
    }
}
