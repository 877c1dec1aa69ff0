//! SubmitResponseHandler - Public command that records one submission.

use std::sync::Arc;

use crate::domain::flow::SubmissionDraft;
use crate::domain::form::FormError;
use crate::domain::foundation::FormId;
use crate::domain::response::ResponseRecord;
use crate::ports::{FormRepository, ResponseRepository};

/// Command to submit a completed response to a form.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub form_id: FormId,
    pub draft: SubmissionDraft,
}

/// Handler for response submission.
///
/// Only published forms accept responses. The repository appends the record
/// and bumps the form's counter together.
pub struct SubmitResponseHandler {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl SubmitResponseHandler {
    pub fn new(forms: Arc<dyn FormRepository>, responses: Arc<dyn ResponseRepository>) -> Self {
        Self { forms, responses }
    }

    pub async fn handle(&self, cmd: SubmitResponseCommand) -> Result<ResponseRecord, FormError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(cmd.form_id))?;
        form.ensure_accepting_responses()?;

        let record = ResponseRecord::from_draft(cmd.form_id, cmd.draft);
        self.responses.append(&record).await?;
        tracing::info!(
            form_id = %record.form_id,
            response_id = %record.id,
            answers = record.answers.len(),
            "response submitted"
        );

        Ok(record)
    }
}
