//! Follow-up generator port used by the adaptive flow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::flow::FollowUpRequest;
use crate::domain::form::Question;

use super::AIError;

/// Generator verdict on whether to ask a follow-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowUpDecision {
    pub should_add_follow_up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FollowUpDecision {
    pub fn none() -> Self {
        Self::default()
    }

    /// The question to splice in, if the generator actually offered one.
    pub fn into_question(self) -> Option<Question> {
        if self.should_add_follow_up {
            self.follow_up_question
        } else {
            None
        }
    }
}

#[async_trait]
pub trait FollowUpGenerator: Send + Sync {
    /// Decide on a follow-up for the question just answered.
    async fn next_follow_up(&self, request: &FollowUpRequest) -> Result<FollowUpDecision, AIError>;
}
