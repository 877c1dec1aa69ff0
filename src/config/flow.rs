//! Respondent flow configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::flow::VisibilityPolicy;
use crate::domain::form::UnknownOperatorPolicy;

use super::error::ValidationError;

/// Upper bound for the follow-up generator deadline.
const MAX_FOLLOW_UP_TIMEOUT_MS: u64 = 60_000;

/// Respondent flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Deadline for the follow-up generator before the flow moves on without one
    #[serde(default = "default_follow_up_timeout")]
    pub follow_up_timeout_ms: u64,

    /// Idle time after which a hosted flow session is evicted
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,

    /// How questions whose condition uses an unknown operator are treated
    #[serde(default)]
    pub unknown_operator: UnknownOperatorPolicy,
}

impl FlowConfig {
    pub fn follow_up_timeout(&self) -> Duration {
        Duration::from_millis(self.follow_up_timeout_ms)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// How often idle sessions are swept: a tenth of the TTL, at least once a second.
    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs((self.session_ttl_secs / 10).max(1))
    }

    pub fn visibility_policy(&self) -> VisibilityPolicy {
        VisibilityPolicy::new(self.unknown_operator)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.follow_up_timeout_ms == 0 || self.follow_up_timeout_ms > MAX_FOLLOW_UP_TIMEOUT_MS {
            return Err(ValidationError::InvalidFollowUpTimeout);
        }
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            follow_up_timeout_ms: default_follow_up_timeout(),
            session_ttl_secs: default_session_ttl(),
            unknown_operator: UnknownOperatorPolicy::default(),
        }
    }
}

fn default_follow_up_timeout() -> u64 {
    5_000
}

fn default_session_ttl() -> u64 {
    3_600
}
