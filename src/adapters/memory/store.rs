//! In-memory implementation of the form, response and insight repositories.
//!
//! All three repositories share one lock so that appending a response and
//! bumping the form's counter happen together, and deleting a form removes
//! its responses and insight in the same step.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::form::Form;
use crate::domain::foundation::{DomainError, ErrorCode, FormId, UserId};
use crate::domain::insight::Insight;
use crate::domain::response::ResponseRecord;
use crate::ports::{FormRepository, InsightRepository, ResponseRepository};

#[derive(Debug, Default)]
struct StoreState {
    forms: HashMap<FormId, Form>,
    responses: HashMap<FormId, Vec<ResponseRecord>>,
    insights: HashMap<FormId, Insight>,
}

/// Shared in-memory store backing all persistence ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove everything (for tests).
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.forms.clear();
        state.responses.clear();
        state.insights.clear();
    }

    pub async fn form_count(&self) -> usize {
        self.state.read().await.forms.len()
    }

    pub async fn response_count(&self, form_id: &FormId) -> usize {
        self.state
            .read()
            .await
            .responses
            .get(form_id)
            .map_or(0, Vec::len)
    }

    pub async fn has_insight(&self, form_id: &FormId) -> bool {
        self.state.read().await.insights.contains_key(form_id)
    }
}

fn form_not_found(id: &FormId) -> DomainError {
    DomainError::new(ErrorCode::FormNotFound, format!("Form not found: {}", id))
        .with_detail("form_id", id.to_string())
}

#[async_trait]
impl FormRepository for InMemoryStore {
    async fn save(&self, form: &Form) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.forms.contains_key(form.id()) {
            return Err(DomainError::database(format!(
                "Form already exists: {}",
                form.id()
            )));
        }
        state.forms.insert(*form.id(), form.clone());
        Ok(())
    }

    async fn update(&self, form: &Form) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let existing = state
            .forms
            .get_mut(form.id())
            .ok_or_else(|| form_not_found(form.id()))?;
        let count = existing.response_count();
        *existing = form.clone();
        existing.restore_response_count(count);
        Ok(())
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        Ok(self.state.read().await.forms.get(id).cloned())
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Form>, DomainError> {
        let state = self.state.read().await;
        let mut forms: Vec<Form> = state
            .forms
            .values()
            .filter(|f| f.owner() == owner)
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(forms)
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if state.forms.remove(id).is_none() {
            return Err(form_not_found(id));
        }
        state.responses.remove(id);
        state.insights.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ResponseRepository for InMemoryStore {
    async fn append(&self, response: &ResponseRecord) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let form = state
            .forms
            .get_mut(&response.form_id)
            .ok_or_else(|| form_not_found(&response.form_id))?;
        form.record_response();
        state
            .responses
            .entry(response.form_id)
            .or_default()
            .push(response.clone());
        Ok(())
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<ResponseRecord>, DomainError> {
        let state = self.state.read().await;
        let mut responses = state.responses.get(form_id).cloned().unwrap_or_default();
        responses.reverse();
        Ok(responses)
    }
}

#[async_trait]
impl InsightRepository for InMemoryStore {
    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.forms.contains_key(&insight.form_id) {
            return Err(form_not_found(&insight.form_id));
        }
        state.insights.insert(insight.form_id, insight.clone());
        Ok(())
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Option<Insight>, DomainError> {
        Ok(self.state.read().await.insights.get(form_id).cloned())
    }

    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Insight>, DomainError> {
        let state = self.state.read().await;
        Ok(form_ids
            .iter()
            .filter_map(|id| state.insights.get(id).cloned())
            .collect())
    }
}
