//! Form aggregate entity.
//!
//! A form is owned by one user, holds the authored question list and the
//! respondent settings, and counts the responses submitted to it. Responses
//! and insights reference the form by id but are stored separately.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    FormId, OwnedByUser, QuestionId, Timestamp, UserId, ValidationError,
};

use super::{FormError, FormSettings, Question};

/// Maximum length for form title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for form description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Input for creating a form.
#[derive(Debug, Clone, Default)]
pub struct NewForm {
    pub title: String,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub questions: Vec<Question>,
    pub settings: FormSettings,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<Question>>,
    pub settings: Option<FormSettings>,
    pub is_published: Option<bool>,
}

impl FormPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.questions.is_none()
            && self.settings.is_none()
            && self.is_published.is_none()
    }
}

/// Form aggregate.
///
/// # Invariants
///
/// - `title` is 1-200 characters after trimming
/// - `description` is at most 1000 characters
/// - question ids are non-blank and unique within the form
/// - every question has `min_rating <= max_rating`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    id: FormId,
    owner: UserId,
    title: String,
    description: Option<String>,
    goal: Option<String>,
    questions: Vec<Question>,
    is_published: bool,
    settings: FormSettings,
    response_count: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Form {
    /// Create a new, unpublished form.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if title, description or questions are invalid
    pub fn create(id: FormId, owner: UserId, input: NewForm) -> Result<Self, FormError> {
        let title = Self::validate_title(&input.title)?;
        let description = normalize_description(input.description);
        Self::validate_description(description.as_deref())?;
        Self::validate_questions(&input.questions)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            owner,
            title,
            description,
            goal: input.goal.filter(|g| !g.trim().is_empty()),
            questions: input.questions,
            is_published: false,
            settings: input.settings,
            response_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a form from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: FormId,
        owner: UserId,
        title: String,
        description: Option<String>,
        goal: Option<String>,
        questions: Vec<Question>,
        is_published: bool,
        settings: FormSettings,
        response_count: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            title,
            description,
            goal,
            questions,
            is_published,
            settings,
            response_count,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &FormId {
        &self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The natural-language goal the form was generated from, if any.
    pub fn goal(&self) -> Option<&str> {
        self.goal.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    pub fn is_published(&self) -> bool {
        self.is_published
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn response_count(&self) -> u64 {
        self.response_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply an owner's partial update.
    ///
    /// Validates every provided field before changing anything.
    pub fn apply_patch(&mut self, patch: FormPatch) -> Result<(), FormError> {
        let title = match patch.title.as_deref() {
            Some(t) => Some(Self::validate_title(t)?),
            None => None,
        };
        let description = patch.description.map(|d| normalize_description(Some(d)));
        if let Some(d) = &description {
            Self::validate_description(d.as_deref())?;
        }
        if let Some(questions) = &patch.questions {
            Self::validate_questions(questions)?;
        }

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(questions) = patch.questions {
            self.questions = questions;
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
        if let Some(published) = patch.is_published {
            self.is_published = published;
        }
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Flip the published flag, returning the new value.
    pub fn toggle_publish(&mut self) -> bool {
        self.is_published = !self.is_published;
        self.updated_at = Timestamp::now();
        self.is_published
    }

    /// Fails unless respondents may currently submit to this form.
    pub fn ensure_accepting_responses(&self) -> Result<(), FormError> {
        if self.is_published {
            Ok(())
        } else {
            Err(FormError::not_accepting_responses(self.id))
        }
    }

    /// Count one more submitted response.
    pub fn record_response(&mut self) {
        self.response_count += 1;
    }

    /// Restore the counter from storage, where it is maintained atomically.
    pub fn restore_response_count(&mut self, count: u64) {
        self.response_count = count;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<String, ValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH));
        }
        Ok(trimmed.to_string())
    }

    fn validate_description(description: Option<&str>) -> Result<(), ValidationError> {
        match description {
            Some(d) if d.chars().count() > MAX_DESCRIPTION_LENGTH => {
                Err(ValidationError::too_long("description", MAX_DESCRIPTION_LENGTH))
            }
            _ => Ok(()),
        }
    }

    fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for question in questions {
            question.validate()?;
            if !seen.insert(&question.id) {
                return Err(ValidationError::invalid_format(
                    "questions.id",
                    format!("duplicate question id '{}'", question.id),
                ));
            }
        }
        Ok(())
    }
}

impl OwnedByUser for Form {
    fn owner_id(&self) -> &UserId {
        &self.owner
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{ConditionalLogic, QuestionType};
    use crate::domain::foundation::ErrorCode;

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn questions() -> Vec<Question> {
        vec![
            Question::new("q1", QuestionType::Rating, "How satisfied are you?"),
            Question::new("q2", QuestionType::Textarea, "What went wrong?")
                .with_logic(ConditionalLogic::when("q1", "lte:3")),
        ]
    }

    fn new_form() -> Form {
        Form::create(
            FormId::new(),
            owner(),
            NewForm {
                title: "  Customer feedback  ".to_string(),
                description: Some("Quarterly pulse".to_string()),
                questions: questions(),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn create_trims_title_and_starts_unpublished() {
        let form = new_form();
        assert_eq!(form.title(), "Customer feedback");
        assert!(!form.is_published());
        assert_eq!(form.response_count(), 0);
        assert_eq!(form.questions().len(), 2);
        assert!(form.settings().adaptive_flow);
    }

    #[test]
    fn create_rejects_blank_and_long_titles() {
        let blank = Form::create(
            FormId::new(),
            owner(),
            NewForm {
                title: "   ".to_string(),
                ..Default::default()
            },
        );
        assert!(matches!(blank, Err(FormError::ValidationFailed { .. })));

        let long = Form::create(
            FormId::new(),
            owner(),
            NewForm {
                title: "x".repeat(MAX_TITLE_LENGTH + 1),
                ..Default::default()
            },
        );
        assert!(long.is_err());
    }

    #[test]
    fn create_rejects_duplicate_question_ids() {
        let mut qs = questions();
        qs[1].id = QuestionId::from("q1");
        let result = Form::create(
            FormId::new(),
            owner(),
            NewForm {
                title: "Dupes".to_string(),
                questions: qs,
                ..Default::default()
            },
        );
        assert!(matches!(
            result,
            Err(FormError::ValidationFailed { ref message, .. }) if message.contains("duplicate")
        ));
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let mut form = new_form();
        let before = *form.updated_at();

        form.apply_patch(FormPatch {
            title: Some("Renamed".to_string()),
            is_published: Some(true),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(form.title(), "Renamed");
        assert_eq!(form.description(), Some("Quarterly pulse"));
        assert!(form.is_published());
        assert!(!form.updated_at().is_before(&before));
    }

    #[test]
    fn invalid_patch_changes_nothing() {
        let mut form = new_form();
        let result = form.apply_patch(FormPatch {
            title: Some("Renamed".to_string()),
            description: Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(form.title(), "Customer feedback");
    }

    #[test]
    fn toggle_publish_flips() {
        let mut form = new_form();
        assert!(form.toggle_publish());
        assert!(form.ensure_accepting_responses().is_ok());
        assert!(!form.toggle_publish());
        assert_eq!(
            form.ensure_accepting_responses().unwrap_err().code(),
            ErrorCode::FormNotPublished
        );
    }

    #[test]
    fn ownership_check_uses_owner() {
        let form = new_form();
        assert!(form.check_ownership(&owner()).is_ok());
        let stranger = UserId::new("someone-else").unwrap();
        assert_eq!(
            form.check_ownership(&stranger).unwrap_err().code,
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn question_lookup_by_id() {
        let form = new_form();
        assert!(form.question(&QuestionId::from("q2")).is_some());
        assert!(form.question(&QuestionId::from("nope")).is_none());
    }
}
