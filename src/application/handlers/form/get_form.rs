//! GetFormHandler - Public query for a single form.

use std::sync::Arc;

use crate::domain::form::{Form, FormError};
use crate::domain::foundation::FormId;
use crate::ports::FormRepository;

/// Query to fetch a form by id. Respondents use this too, so it is not
/// owner-scoped.
#[derive(Debug, Clone)]
pub struct GetFormQuery {
    pub form_id: FormId,
}

pub struct GetFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl GetFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetFormQuery) -> Result<Form, FormError> {
        self.repository
            .find_by_id(&query.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(query.form_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    #[tokio::test]
    async fn missing_form_is_not_found() {
        let handler = GetFormHandler::new(Arc::new(InMemoryStore::new()));
        let id = FormId::new();
        let result = handler.handle(GetFormQuery { form_id: id }).await;
        assert_eq!(result.unwrap_err(), FormError::NotFound(id));
    }
}
