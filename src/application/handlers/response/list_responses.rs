//! ListResponsesHandler - Owner query for a form's submissions.

use std::sync::Arc;

use crate::domain::form::FormError;
use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::domain::response::ResponseRecord;
use crate::ports::{FormRepository, ResponseRepository};

#[derive(Debug, Clone)]
pub struct ListResponsesQuery {
    pub owner: UserId,
    pub form_id: FormId,
}

/// Responses newest first, with the total.
#[derive(Debug, Clone)]
pub struct ResponseList {
    pub responses: Vec<ResponseRecord>,
    pub total: usize,
}

pub struct ListResponsesHandler {
    forms: Arc<dyn FormRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl ListResponsesHandler {
    pub fn new(forms: Arc<dyn FormRepository>, responses: Arc<dyn ResponseRepository>) -> Self {
        Self { forms, responses }
    }

    pub async fn handle(&self, query: ListResponsesQuery) -> Result<ResponseList, FormError> {
        let form = self
            .forms
            .find_by_id(&query.form_id)
            .await?
            .ok_or_else(|| FormError::not_found(query.form_id))?;
        form.check_ownership(&query.owner)?;

        let responses = self.responses.find_by_form(&query.form_id).await?;
        let total = responses.len();
        Ok(ResponseList { responses, total })
    }
}
