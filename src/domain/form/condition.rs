//! Trigger condition mini-language: `"lte:<number>"`, `"gte:<number>"`,
//! `"eq:<string>"`.
//!
//! Conditions are persisted as plain strings on the question and parsed on
//! demand. Parsing never fails; anything that is not a well-formed rule is
//! kept as `Malformed` or `UnknownOperator` so evaluation can fail safe.

use serde::{Deserialize, Serialize};

/// Something a condition can be evaluated against (an answer).
pub trait ConditionOperand {
    /// Numeric reading of the value, if it has one.
    fn as_number(&self) -> Option<f64>;

    /// Text reading of the value used for `eq` comparisons.
    fn as_text(&self) -> String;
}

/// Policy for conditions whose operator is not `lte`, `gte` or `eq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownOperatorPolicy {
    /// Treat the condition as not satisfied; the dependent question is hidden.
    #[default]
    Suppress,
    /// Treat the condition as satisfied once the trigger has an answer.
    Show,
}

/// Parsed trigger condition.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerCondition {
    /// `lte:<n>`: answer <= n.
    AtMost(f64),
    /// `gte:<n>`: answer >= n.
    AtLeast(f64),
    /// `eq:<s>`: case-insensitive text equality.
    Equals(String),
    /// Well-formed `op:value` with an operator outside the language.
    UnknownOperator { op: String, value: String },
    /// No separator, or a numeric operator with a non-numeric value.
    Malformed(String),
}

impl TriggerCondition {
    /// Parses a raw `"op:value"` string.
    ///
    /// The operator is matched case-insensitively after trimming. Only the
    /// first `:` separates, so `eq:a:b` compares against `a:b`.
    pub fn parse(raw: &str) -> Self {
        let Some((op, value)) = raw.split_once(':') else {
            return TriggerCondition::Malformed(raw.to_string());
        };

        let op = op.trim().to_ascii_lowercase();
        match op.as_str() {
            "lte" | "gte" => match parse_number(value) {
                Some(n) if op == "lte" => TriggerCondition::AtMost(n),
                Some(n) => TriggerCondition::AtLeast(n),
                None => TriggerCondition::Malformed(raw.to_string()),
            },
            "eq" => TriggerCondition::Equals(value.trim().to_string()),
            _ => TriggerCondition::UnknownOperator {
                op,
                value: value.to_string(),
            },
        }
    }

    /// True for `lte`, `gte` and `eq` rules with well-formed values.
    pub fn is_recognized(&self) -> bool {
        !matches!(
            self,
            TriggerCondition::UnknownOperator { .. } | TriggerCondition::Malformed(_)
        )
    }

    /// Evaluates the rule against an answer.
    ///
    /// Unrecognized and malformed rules are never satisfied here; callers
    /// apply an `UnknownOperatorPolicy` on top when needed.
    pub fn matches<A: ConditionOperand + ?Sized>(&self, answer: &A) -> bool {
        match self {
            TriggerCondition::AtMost(limit) => answer.as_number().is_some_and(|n| n <= *limit),
            TriggerCondition::AtLeast(limit) => answer.as_number().is_some_and(|n| n >= *limit),
            TriggerCondition::Equals(expected) => {
                answer.as_text().trim().to_lowercase() == expected.to_lowercase()
            }
            TriggerCondition::UnknownOperator { .. } | TriggerCondition::Malformed(_) => false,
        }
    }

    /// Evaluates the rule, resolving unknown operators through `policy`.
    ///
    /// Malformed rules stay unsatisfied regardless of policy.
    pub fn evaluate<A: ConditionOperand + ?Sized>(
        &self,
        answer: &A,
        policy: UnknownOperatorPolicy,
    ) -> bool {
        match self {
            TriggerCondition::UnknownOperator { .. } => policy == UnknownOperatorPolicy::Show,
            _ => self.matches(answer),
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
