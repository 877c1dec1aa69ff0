//! Answer values collected during a respondent flow.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::form::ConditionOperand;
use crate::domain::foundation::QuestionId;

/// A single answer: scalar or list, as submitted by the respondent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AnswerValue>),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    /// Blank text and empty lists count as "not answered".
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::List(items) => items.is_empty(),
            AnswerValue::Bool(_) | AnswerValue::Number(_) => false,
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<i64> for AnswerValue {
    fn from(n: i64) -> Self {
        AnswerValue::Number(n as f64)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl ConditionOperand for AnswerValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            AnswerValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            AnswerValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            AnswerValue::List(items) if items.len() == 1 => items[0].as_number(),
            AnswerValue::List(_) => None,
        }
    }

    fn as_text(&self) -> String {
        match self {
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::Number(n) => format_number(*n),
            AnswerValue::Bool(b) => b.to_string(),
            AnswerValue::List(items) => items
                .iter()
                .map(|item| item.as_text())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

/// Integral numbers print without a trailing `.0` so `eq:3` matches `3`.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Answers recorded so far in one flow, keyed by question id.
///
/// Last write wins; entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(HashMap<QuestionId, AnswerValue>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: QuestionId, value: AnswerValue) -> Option<AnswerValue> {
        self.0.insert(id, value)
    }

    pub fn get(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.0.get(id)
    }

    /// The answer for `id`, unless it is missing or empty.
    pub fn answered(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.0.get(id).filter(|v| !v.is_empty())
    }

    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.answered(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.0.iter()
    }
}

impl FromIterator<(QuestionId, AnswerValue)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (QuestionId, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
