//! UpdateFormHandler - Command handler for owner edits.

use std::sync::Arc;

use crate::domain::form::{Form, FormError, FormPatch};
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

/// Command to patch a form.
#[derive(Debug, Clone)]
pub struct UpdateFormCommand {
    pub owner: UserId,
    pub form_id: FormId,
    pub patch: FormPatch,
}

/// Handler for updating forms.
pub struct UpdateFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl UpdateFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateFormCommand) -> Result<Form, FormError> {
        let mut form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(cmd.form_id))?;
        form.check_ownership(&cmd.owner)?;

        form.apply_patch(cmd.patch)?;
        self.repository.update(&form).await?;
        tracing::debug!(form_id = %form.id(), "form updated");

        Ok(form)
    }
}
