//! HTTP DTOs for form endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::form::{Form, FormSettings, Question};

/// Request to create a form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub settings: FormSettings,
}

/// Full form as returned to owners and respondents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub questions: Vec<Question>,
    pub is_published: bool,
    pub settings: FormSettings,
    pub response_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Form> for FormView {
    fn from(form: &Form) -> Self {
        Self {
            id: form.id().to_string(),
            owner_id: form.owner().to_string(),
            title: form.title().to_string(),
            description: form.description().map(str::to_string),
            goal: form.goal().map(str::to_string),
            questions: form.questions().to_vec(),
            is_published: form.is_published(),
            settings: form.settings().clone(),
            response_count: form.response_count(),
            created_at: *form.created_at().as_datetime(),
            updated_at: *form.updated_at().as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEnvelope {
    pub form: FormView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormEnvelope {
    pub fn new(form: &Form) -> Self {
        Self {
            form: form.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormListResponse {
    pub forms: Vec<FormView>,
    pub total: usize,
}

impl From<Vec<Form>> for FormListResponse {
    fn from(forms: Vec<Form>) -> Self {
        let forms: Vec<FormView> = forms.iter().map(FormView::from).collect();
        Self {
            total: forms.len(),
            forms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
