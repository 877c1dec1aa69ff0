//! Suppressed-set computation over an effective question sequence.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::form::{Question, UnknownOperatorPolicy};
use crate::domain::foundation::QuestionId;

use super::AnswerMap;

/// Tunables for condition evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPolicy {
    pub unknown_operator: UnknownOperatorPolicy,
}

impl VisibilityPolicy {
    pub fn new(unknown_operator: UnknownOperatorPolicy) -> Self {
        Self { unknown_operator }
    }
}

/// Returns the ids of questions that must not be shown.
///
/// A conditional question is visible only when its trigger has a non-empty
/// answer and the condition holds. Questions are walked in sequence order and
/// the answer of a trigger that is itself suppressed is ignored, so hiding a
/// question also hides everything gated on it. Questions without enabled
/// logic are never suppressed.
pub fn compute_visibility<'a, I>(
    questions: I,
    answers: &AnswerMap,
    policy: VisibilityPolicy,
) -> HashSet<QuestionId>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut suppressed = HashSet::new();

    for question in questions {
        let logic = &question.conditional_logic;
        if !logic.enabled {
            continue;
        }

        let trigger = &logic.trigger_question_id;
        let visible = if suppressed.contains(trigger) {
            false
        } else {
            match answers.answered(trigger) {
                Some(answer) => logic.condition().evaluate(answer, policy.unknown_operator),
                None => false,
            }
        };

        if !visible {
            suppressed.insert(question.id.clone());
        }
    }

    suppressed
}
