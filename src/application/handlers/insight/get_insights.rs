//! GetInsightsHandler - Public read of a form's latest insight.

use std::sync::Arc;

use crate::domain::foundation::FormId;
use crate::domain::insight::{Insight, InsightError};
use crate::ports::InsightRepository;

#[derive(Debug, Clone)]
pub struct GetInsightsQuery {
    pub form_id: FormId,
}

pub struct GetInsightsHandler {
    insights: Arc<dyn InsightRepository>,
}

impl GetInsightsHandler {
    pub fn new(insights: Arc<dyn InsightRepository>) -> Self {
        Self { insights }
    }

    pub async fn handle(&self, query: GetInsightsQuery) -> Result<Insight, InsightError> {
        self.insights
            .find_by_form(&query.form_id)
            .await?
            .ok_or(InsightError::NotFound(query.form_id))
    }
}
