//! DeleteFormHandler - Removes a form along with its responses and insight.

use std::sync::Arc;

use crate::domain::form::FormError;
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::ports::FormRepository;

#[derive(Debug, Clone)]
pub struct DeleteFormCommand {
    pub owner: UserId,
    pub form_id: FormId,
}

pub struct DeleteFormHandler {
    repository: Arc<dyn FormRepository>,
}

impl DeleteFormHandler {
    pub fn new(repository: Arc<dyn FormRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteFormCommand) -> Result<(), FormError> {
        let form = self
            .repository
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(cmd.form_id))?;
        form.check_ownership(&cmd.owner)?;

        self.repository.delete(&cmd.form_id).await?;
        tracing::info!(form_id = %cmd.form_id, "form deleted");
        Ok(())
    }
}
