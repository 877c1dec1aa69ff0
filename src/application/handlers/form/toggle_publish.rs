//! TogglePublishHandler - Opens or closes a form to respondents.

use std::sync::Arc;

use crate::domain::form::{Form, FormError};
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct TogglePublishCommand {
    pub owner: UserId,
    pub form_id: FormId,
}

pub struct TogglePublishHandler {
    repository: Arc<dyn FormRepository>,
}

impl TogglePublishHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: TogglePublishCommand) -> Result<Form, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(cmd.form_id))?;
        form.check_ownership(&cmd.owner)?;

        let published = form.toggle_publish();
        self.repository.update(&form).await?;
        tracing::info!(form_id = %form.id(), published, "form publish state changed");

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::form::NewForm;

    #[tokio::test]
    async fn toggles_back_and_forth() {
        let store = Arc::new(InMemoryStore::new());
        let owner = UserId::new("owner-1").unwrap();
        let form = Form::create(
            FormId::new(),
            owner.clone(),
            NewForm {
                title: "Launch".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        store.save(&form).await.unwrap();
        let handler = TogglePublishHandler::new(store.clone());
        let cmd = TogglePublishCommand {
            owner,
            form_id: *form.id(),
        };

        assert!(handler.handle(cmd.clone()).await.unwrap().is_published());
        assert!(store.find_by_id(form.id()).await.unwrap().unwrap().is_published());
        assert!(!handler.handle(cmd).await.unwrap().is_published());
    }
}
