//! Question definitions authored into a form.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{QuestionId, ValidationError};

use super::condition::TriggerCondition;

/// Maximum length of a question's prompt text.
pub const MAX_QUESTION_TEXT_LENGTH: usize = 1000;

/// Kind of input a question collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Text,
    Textarea,
    Rating,
    #[serde(alias = "multiple_choice")]
    Mcq,
    Scale,
    YesNo,
    Email,
    Number,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Textarea => "textarea",
            QuestionType::Rating => "rating",
            QuestionType::Mcq => "mcq",
            QuestionType::Scale => "scale",
            QuestionType::YesNo => "yes_no",
            QuestionType::Email => "email",
            QuestionType::Number => "number",
        }
    }

    /// True for types whose answers are bounded by `min_rating..=max_rating`.
    pub fn is_ranged(&self) -> bool {
        matches!(self, QuestionType::Rating | QuestionType::Scale)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens to a question when its trigger condition holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionAction {
    #[default]
    Show,
    Skip,
}

/// Visibility rule tying a question to an earlier question's answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionalLogic {
    pub enabled: bool,
    pub trigger_question_id: QuestionId,
    /// Raw `"op:value"` rule, kept verbatim so persisted forms round-trip.
    pub trigger_condition: String,
    pub action: ConditionAction,
}

impl ConditionalLogic {
    /// Enabled rule on `trigger` with the given `"op:value"` condition.
    pub fn when(trigger: impl Into<QuestionId>, condition: impl Into<String>) -> Self {
        Self {
            enabled: true,
            trigger_question_id: trigger.into(),
            trigger_condition: condition.into(),
            action: ConditionAction::Show,
        }
    }

    /// Parses the stored condition string.
    pub fn condition(&self) -> TriggerCondition {
        TriggerCondition::parse(&self.trigger_condition)
    }
}

fn default_required() -> bool {
    true
}

fn default_min_rating() -> i32 {
    1
}

fn default_max_rating() -> i32 {
    5
}

/// A single question in a form, or an ephemeral follow-up in a flow session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default = "default_min_rating")]
    pub min_rating: i32,
    #[serde(default = "default_max_rating")]
    pub max_rating: i32,
    #[serde(default)]
    pub conditional_logic: ConditionalLogic,
}

impl Question {
    /// Creates a required question with default rating bounds and no logic.
    pub fn new(
        id: impl Into<QuestionId>,
        question_type: QuestionType,
        question: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question_type,
            question: question.into(),
            placeholder: None,
            options: Vec::new(),
            required: default_required(),
            min_rating: default_min_rating(),
            max_rating: default_max_rating(),
            conditional_logic: ConditionalLogic::default(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn with_logic(mut self, logic: ConditionalLogic) -> Self {
        self.conditional_logic = logic;
        self
    }

    /// True when visibility depends on another question's answer.
    pub fn is_conditional(&self) -> bool {
        self.conditional_logic.enabled
    }

    /// Checks the per-question invariants.
    ///
    /// Uniqueness of ids is a form-level concern and is checked by the form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_blank() {
            return Err(ValidationError::empty_field("questions.id"));
        }
        if self.question.trim().is_empty() {
            return Err(ValidationError::empty_field(format!(
                "questions[{}].question",
                self.id
            )));
        }
        if self.question.chars().count() > MAX_QUESTION_TEXT_LENGTH {
            return Err(ValidationError::too_long(
                format!("questions[{}].question", self.id),
                MAX_QUESTION_TEXT_LENGTH,
            ));
        }
        if self.min_rating > self.max_rating {
            return Err(ValidationError::invalid_format(
                format!("questions[{}].minRating", self.id),
                format!(
                    "minRating {} exceeds maxRating {}",
                    self.min_rating, self.max_rating
                ),
            ));
        }
        Ok(())
    }
}
