//! AdaptiveNextHandler - Stateless follow-up suggestion for client-driven flows.

use std::sync::Arc;

use crate::domain::flow::FollowUpRequest;
use crate::ports::{AIError, FollowUpDecision, FollowUpGenerator};

/// Handler for one-off follow-up suggestions.
///
/// Unlike advancing a hosted flow, errors are returned to the caller here.
pub struct AdaptiveNextHandler {
    follow_ups: Arc<dyn FollowUpGenerator>,
}

impl AdaptiveNextHandler {
    pub fn new(follow_ups: Arc<dyn FollowUpGenerator>) -> Self {
        Self { follow_ups }
    }

    pub async fn handle(&self, request: FollowUpRequest) -> Result<FollowUpDecision, AIError> {
        if request.questions.is_empty() {
            return Err(AIError::InvalidRequest("questions are required".to_string()));
        }
        let decision = self.follow_ups.next_follow_up(&request).await?;
        // A suggestion without a usable question is reported as no follow-up.
        match &decision.follow_up_question {
            Some(q) if decision.should_add_follow_up && q.validate().is_err() => {
                tracing::debug!(question = %q.id, "discarding invalid follow-up suggestion");
                Ok(FollowUpDecision {
                    should_add_follow_up: false,
                    follow_up_question: None,
                    reason: decision.reason,
                })
            }
            None if decision.should_add_follow_up => Ok(FollowUpDecision {
                should_add_follow_up: false,
                ..decision
            }),
            _ => Ok(decision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{Question, QuestionType};
    use crate::domain::foundation::QuestionId;
    use async_trait::async_trait;

    struct Fixed(FollowUpDecision);

    #[async_trait]
    impl FollowUpGenerator for Fixed {
        async fn next_follow_up(
            &self,
            _request: &FollowUpRequest,
        ) -> Result<FollowUpDecision, AIError> {
            Ok(self.0.clone())
        }
    }

    fn request() -> FollowUpRequest {
        FollowUpRequest {
            questions: vec![Question::new("q1", QuestionType::Rating, "Rate us")],
            answers: vec![],
            current_question_id: QuestionId::from("q1"),
        }
    }

    #[tokio::test]
    async fn passes_through_valid_suggestion() {
        let decision = FollowUpDecision {
            should_add_follow_up: true,
            follow_up_question: Some(Question::new(
                "adaptive_1",
                QuestionType::Textarea,
                "Why?",
            )),
            reason: Some("low".to_string()),
        };
        let handler = AdaptiveNextHandler::new(Arc::new(Fixed(decision.clone())));

        assert_eq!(handler.handle(request()).await.unwrap(), decision);
    }

    #[tokio::test]
    async fn suggestion_without_question_means_no_follow_up() {
        let handler = AdaptiveNextHandler::new(Arc::new(Fixed(FollowUpDecision {
            should_add_follow_up: true,
            follow_up_question: None,
            reason: None,
        })));

        let decision = handler.handle(request()).await.unwrap();

        assert!(!decision.should_add_follow_up);
    }

    #[tokio::test]
    async fn invalid_question_is_discarded() {
        let handler = AdaptiveNextHandler::new(Arc::new(Fixed(FollowUpDecision {
            should_add_follow_up: true,
            follow_up_question: Some(Question::new("", QuestionType::Text, "Why?")),
            reason: Some("low".to_string()),
        })));

        let decision = handler.handle(request()).await.unwrap();

        assert!(!decision.should_add_follow_up);
        assert!(decision.follow_up_question.is_none());
        assert_eq!(decision.reason.as_deref(), Some("low"));
    }

    #[tokio::test]
    async fn empty_question_list_is_rejected() {
        let handler = AdaptiveNextHandler::new(Arc::new(Fixed(FollowUpDecision::none())));
        let mut req = request();
        req.questions.clear();

        assert!(matches!(
            handler.handle(req).await,
            Err(AIError::InvalidRequest(_))
        ));
    }
}
