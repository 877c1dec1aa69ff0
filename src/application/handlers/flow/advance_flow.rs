//! AdvanceFlowHandler - Moves a flow forward, asking for a follow-up first.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::flow::{FlowError, FollowUpRequest};
use crate::domain::form::Question;
use crate::domain::foundation::{FlowSessionId, QuestionId};
use crate::ports::{FlowSessionStore, FollowUpGenerator};

use super::{load_session, FlowSnapshot};

#[derive(Debug, Clone)]
pub struct AdvanceFlowCommand {
    pub session_id: FlowSessionId,
}

#[derive(Debug, Clone)]
pub struct AdvanceFlowResult {
    pub snapshot: FlowSnapshot,
    /// Id of the follow-up spliced in by this step, if any.
    pub follow_up_added: Option<QuestionId>,
}

/// Handler for advancing.
///
/// The follow-up call is best effort: it is bounded by `follow_up_timeout`
/// and any failure means the flow simply continues without one. If the
/// session moves while the call is in flight, the advance is dropped.
pub struct AdvanceFlowHandler {
    sessions: Arc<dyn FlowSessionStore>,
    follow_ups: Arc<dyn FollowUpGenerator>,
    follow_up_timeout: Duration,
}

impl AdvanceFlowHandler {
    pub fn new(
        sessions: Arc<dyn FlowSessionStore>,
        follow_ups: Arc<dyn FollowUpGenerator>,
        follow_up_timeout: Duration,
    ) -> Self {
        Self {
            sessions,
            follow_ups,
            follow_up_timeout,
        }
    }

    pub async fn handle(&self, cmd: AdvanceFlowCommand) -> Result<AdvanceFlowResult, FlowError> {
        let shared = load_session(self.sessions.as_ref(), &cmd.session_id).await?;

        // The lock is released while the generator runs.
        let pending = {
            let session = shared.lock().await;
            let request = session.follow_up_request().filter(|_| session.can_proceed());
            request.map(|request| (request, session.position().clone()))
        };
        let generated = match pending {
            Some((request, origin)) => Some((self.request_follow_up(&request).await, origin)),
            None => None,
        };

        let mut session = shared.lock().await;
        let follow_up = match generated {
            Some((_, origin)) if *session.position() != origin => {
                tracing::debug!(
                    session_id = %cmd.session_id,
                    "session moved during follow-up generation, discarding result"
                );
                return Ok(AdvanceFlowResult {
                    snapshot: FlowSnapshot::capture(&session),
                    follow_up_added: None,
                });
            }
            Some((question, _)) => question,
            None => None,
        };

        let outcome = session.advance(follow_up)?;
        if let Some(id) = &outcome.follow_up_added {
            tracing::debug!(session_id = %cmd.session_id, follow_up = %id, "follow-up spliced");
        }

        Ok(AdvanceFlowResult {
            snapshot: FlowSnapshot::capture(&session),
            follow_up_added: outcome.follow_up_added,
        })
    }

    async fn request_follow_up(&self, request: &FollowUpRequest) -> Option<Question> {
        let call = self.follow_ups.next_follow_up(request);
        match tokio::time::timeout(self.follow_up_timeout, call).await {
            Ok(Ok(decision)) => {
                if let Some(reason) = &decision.reason {
                    tracing::debug!(
                        question = %request.current_question_id,
                        add = decision.should_add_follow_up,
                        reason = %reason,
                        "follow-up decision"
                    );
                }
                decision.into_question()
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    question = %request.current_question_id,
                    error = %e,
                    "follow-up generation failed, continuing without one"
                );
                None
            }
            Err(_) => {
                tracing::warn!(
                    question = %request.current_question_id,
                    timeout_ms = self.follow_up_timeout.as_millis() as u64,
                    "follow-up generation timed out, continuing without one"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::flow::test_support::{published_form, stores};
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::llm::LlmFollowUpGenerator;
    use crate::application::handlers::flow::{
        GoBackCommand, GoBackHandler, RecordAnswerCommand, RecordAnswerHandler,
        SetContactCommand, SetContactHandler, StartFlowCommand, StartFlowHandler,
    };
    use crate::domain::flow::{AnswerValue, FlowPosition, VisibilityPolicy};
    use crate::domain::form::QuestionType;
    use crate::ports::{AIError, FollowUpDecision, SharedFlowSession};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    enum Behaviour {
        Offer(Question),
        Decline,
        Fail,
        Hang,
        Gated(Arc<Notify>, Question),
    }

    struct MockFollowUpGenerator {
        behaviour: Behaviour,
        requests: Mutex<Vec<FollowUpRequest>>,
    }

    impl MockFollowUpGenerator {
        fn new(behaviour: Behaviour) -> Self {
            Self {
                behaviour,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl FollowUpGenerator for MockFollowUpGenerator {
        async fn next_follow_up(
            &self,
            request: &FollowUpRequest,
        ) -> Result<FollowUpDecision, AIError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.behaviour {
                Behaviour::Offer(q) => Ok(FollowUpDecision {
                    should_add_follow_up: true,
                    follow_up_question: Some(q.clone()),
                    reason: Some("low score".to_string()),
                }),
                Behaviour::Decline => Ok(FollowUpDecision::none()),
                Behaviour::Fail => Err(AIError::unavailable("down")),
                Behaviour::Gated(gate, q) => {
                    gate.notified().await;
                    Ok(FollowUpDecision {
                        should_add_follow_up: true,
                        follow_up_question: Some(q.clone()),
                        reason: None,
                    })
                }
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(FollowUpDecision::none())
                }
            }
        }
    }

    struct Harness {
        sessions: Arc<crate::adapters::memory::InMemoryFlowSessionStore>,
        generator: Arc<MockFollowUpGenerator>,
        handler: AdvanceFlowHandler,
        session_id: FlowSessionId,
    }

    /// Starts a session on the checkout form and fills in the contact step.
    async fn started_session() -> (
        Arc<crate::adapters::memory::InMemoryFlowSessionStore>,
        FlowSessionId,
    ) {
        let (store, sessions) = stores();
        let form = published_form(&store).await;
        let started = StartFlowHandler::new(store, sessions.clone(), VisibilityPolicy::default())
            .handle(StartFlowCommand {
                form_id: *form.id(),
                ..Default::default()
            })
            .await
            .unwrap();
        SetContactHandler::new(sessions.clone())
            .handle(SetContactCommand {
                session_id: started.session_id,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();
        (sessions, started.session_id)
    }

    impl Harness {
        async fn new(behaviour: Behaviour) -> Self {
            Self::with_timeout(behaviour, Duration::from_millis(50)).await
        }

        async fn with_timeout(behaviour: Behaviour, timeout: Duration) -> Self {
            let (sessions, session_id) = started_session().await;
            let generator = Arc::new(MockFollowUpGenerator::new(behaviour));
            let handler = AdvanceFlowHandler::new(sessions.clone(), generator.clone(), timeout);
            Self {
                sessions,
                generator,
                handler,
                session_id,
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

        async fn advance(&self) -> Result<AdvanceFlowResult, FlowError> {
            self.handler
                .handle(AdvanceFlowCommand {
                    session_id: self.session_id,
                })
                .await
        }

        async fn back(&self) {
            GoBackHandler::new(self.sessions.clone())
                .handle(GoBackCommand {
                    session_id: self.session_id,
                })
                .await
                .unwrap();
        }

        async fn shared(&self) -> SharedFlowSession {
            self.sessions.get(&self.session_id).await.unwrap()
        }
    }

    fn follow_up() -> Question {
        Question::new("adaptive_1", QuestionType::Textarea, "What made checkout hard?")
    }

    fn at(id: &str) -> FlowPosition {
        FlowPosition::Question(QuestionId::from(id))
    }

    #[tokio::test]
    async fn follow_up_is_spliced_after_rating() {
        let h = Harness::new(Behaviour::Offer(follow_up())).await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(2.0)).await;

        let result = h.advance().await.unwrap();

        assert_eq!(result.follow_up_added, Some(QuestionId::from("adaptive_1")));
        assert_eq!(result.snapshot.position, at("adaptive_1"));
        assert_eq!(result.snapshot.total_questions, 4);
        assert_eq!(h.generator.request_count(), 1);
    }

    #[tokio::test]
    async fn generator_not_called_for_non_rating_questions() {
        let h = Harness::new(Behaviour::Decline).await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(5.0)).await;
        h.advance().await.unwrap();
        let after_rating = h.generator.request_count();
        let result = h.advance().await.unwrap();

        assert_eq!(after_rating, 1);
        assert_eq!(h.generator.request_count(), 1);
        assert_eq!(result.snapshot.position, FlowPosition::Complete);
    }

    #[tokio::test]
    async fn declined_follow_up_continues_normally() {
        let h = Harness::new(Behaviour::Decline).await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(2.0)).await;

        let result = h.advance().await.unwrap();

        assert!(result.follow_up_added.is_none());
        assert_eq!(result.snapshot.position, at("q2"));
    }

    #[tokio::test]
    async fn generator_failure_is_swallowed() {
        let h = Harness::new(Behaviour::Fail).await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(2.0)).await;

        let result = h.advance().await.unwrap();

        assert!(result.follow_up_added.is_none());
        assert_eq!(result.snapshot.position, at("q2"));
    }

    #[tokio::test]
    async fn slow_generator_times_out() {
        let h = Harness::new(Behaviour::Hang).await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(4.0)).await;

        let started = std::time::Instant::now();
        let result = h.advance().await.unwrap();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(result.follow_up_added.is_none());
        assert_eq!(result.snapshot.position, at("q3"));
    }

    #[tokio::test]
    async fn intro_requires_contact() {
        let (store, sessions) = stores();
        let form = published_form(&store).await;
        let started = StartFlowHandler::new(store, sessions.clone(), VisibilityPolicy::default())
            .handle(StartFlowCommand {
                form_id: *form.id(),
                ..Default::default()
            })
            .await
            .unwrap();
        let handler = AdvanceFlowHandler::new(
            sessions,
            Arc::new(MockFollowUpGenerator::new(Behaviour::Decline)),
            Duration::from_millis(50),
        );

        let result = handler
            .handle(AdvanceFlowCommand {
                session_id: started.session_id,
            })
            .await;

        assert_eq!(result.unwrap_err(), FlowError::ContactIncomplete);
    }

    #[tokio::test]
    async fn unanswered_required_question_blocks_without_calling_generator() {
        let h = Harness::new(Behaviour::Offer(follow_up())).await;
        h.advance().await.unwrap();

        let result = h.advance().await;

        assert_eq!(
            result.unwrap_err(),
            FlowError::AnswerRequired(QuestionId::from("q1"))
        );
        assert_eq!(h.generator.request_count(), 0);
        assert_eq!(*h.shared().await.lock().await.position(), at("q1"));
    }

    #[tokio::test]
    async fn repeated_follow_up_from_llm_is_not_spliced_twice() {
        let offer = r#"{"shouldAddFollowUp": true,
            "followUpQuestion": {"id": "adaptive_1", "type": "textarea", "question": "What went wrong?", "required": false},
            "reason": "low rating"}"#;
        let provider = MockAIProvider::new().with_response(offer).with_response(offer);
        let (sessions, session_id) = started_session().await;
        let handler = AdvanceFlowHandler::new(
            sessions.clone(),
            Arc::new(LlmFollowUpGenerator::new(Arc::new(provider.clone()))),
            Duration::from_secs(1),
        );
        let advance = || handler.handle(AdvanceFlowCommand { session_id });

        advance().await.unwrap();
        RecordAnswerHandler::new(sessions.clone())
            .handle(RecordAnswerCommand {
                session_id,
                question_id: QuestionId::from("q1"),
                value: AnswerValue::from(2.0),
            })
            .await
            .unwrap();
        let first = advance().await.unwrap();
        GoBackHandler::new(sessions.clone())
            .handle(GoBackCommand { session_id })
            .await
            .unwrap();
        let second = advance().await.unwrap();

        assert_eq!(first.follow_up_added, Some(QuestionId::from("adaptive_1")));
        assert_eq!(second.follow_up_added, None);
        assert_eq!(provider.call_count(), 2);
        assert_eq!(second.snapshot.total_questions, first.snapshot.total_questions);
        assert_eq!(second.snapshot.position, at("adaptive_1"));
        let shared = sessions.get(&session_id).await.unwrap();
        assert_eq!(shared.lock().await.effective_questions().len(), 4);
    }

    #[tokio::test]
    async fn follow_up_is_discarded_when_session_moves_back() {
        let gate = Arc::new(Notify::new());
        let h = Harness::with_timeout(
            Behaviour::Gated(gate.clone(), follow_up()),
            Duration::from_secs(5),
        )
        .await;
        h.advance().await.unwrap();
        h.answer("q1", AnswerValue::from(2.0)).await;

        let (result, _) = tokio::join!(h.advance(), async {
            while h.generator.request_count() == 0 {
                tokio::task::yield_now().await;
            }
            h.back().await;
            gate.notify_one();
        });

        let result = result.unwrap();
        assert!(result.follow_up_added.is_none());
        assert_eq!(result.snapshot.position, FlowPosition::Intro);
        assert_eq!(result.snapshot.total_questions, 3);
    }
}
