//! CreateFormHandler - Command handler for authoring a new form.

use std::sync::Arc;

use crate::domain::form::{Form, FormError, FormSettings, NewForm, Question};
use crate::domain::foundation::{FormId, UserId};
use crate::ports::FormRepository;

/// Command to create a form.
#[derive(Debug, Clone)]
pub struct CreateFormCommand {
    pub owner: UserId,
    pub title: String,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub questions: Vec<Question>,
    pub settings: FormSettings,
}

/// Handler for creating forms.
pub struct CreateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl CreateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateFormCommand) -> Result<Form, FormError> {
        let form = Form::create(
            FormId::new(),
            cmd.owner,
            NewForm {
                title: cmd.title,
                description: cmd.description,
                goal: cmd.goal,
                questions: cmd.questions,
                settings: cmd.settings,
            },
        )?;

        self.repository.save(&form).await?;
        tracing::info!(form_id = %form.id(), questions = form.questions().len(), "form created");

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::form::QuestionType;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use async_trait::async_trait;

    struct FailingFormRepository;

    #[async_trait]
    impl FormRepository for FailingFormRepository {
        async fn save(&self, _form: &Form) -> Result<(), DomainError> {
            Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated save failure",
            ))
        }

        async fn update(&self, _form: &Form) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &FormId) -> Result<Option<Form>, DomainError> {
            Ok(None)
        }

        async fn find_by_owner(&self, _owner: &UserId) -> Result<Vec<Form>, DomainError> {
            Ok(vec![])
        }

        async fn delete(&self, _id: &FormId) -> Result<(), DomainError> {
            Ok(())
        }
    }

    fn command(title: &str) -> CreateFormCommand {
        CreateFormCommand {
            owner: UserId::new("owner-1").unwrap(),
            title: title.to_string(),
            description: None,
            goal: None,
            questions: vec![Question::new("q1", QuestionType::Rating, "Rate us")],
            settings: FormSettings::default(),
        }
    }

    #[tokio::test]
    async fn creates_and_persists_unpublished_form() {
        let store = Arc::new(InMemoryStore::new());
        let handler = CreateFormHandler::new(store.clone());

        let form = handler.handle(command("Pulse survey")).await.unwrap();

        assert!(!form.is_published());
        assert_eq!(form.response_count(), 0);
        let saved = store.find_by_id(form.id()).await.unwrap().unwrap();
        assert_eq!(saved.title(), "Pulse survey");
    }

    #[tokio::test]
    async fn rejects_blank_title_without_saving() {
        let store = Arc::new(InMemoryStore::new());
        let handler = CreateFormHandler::new(store.clone());

        let result = handler.handle(command("  ")).await;

        assert!(matches!(result, Err(FormError::ValidationFailed { .. })));
        assert_eq!(store.form_count().await, 0);
    }

    #[tokio::test]
    async fn surfaces_repository_failure() {
        let handler = CreateFormHandler::new(Arc::new(FailingFormRepository));
        let result = handler.handle(command("Pulse survey")).await;
        assert!(matches!(result, Err(FormError::Infrastructure(_))));
    }
}
