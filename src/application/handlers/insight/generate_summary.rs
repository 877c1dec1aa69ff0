//! GenerateSummaryHandler - Writes an executive summary for an insight.

use std::sync::Arc;

use crate::domain::foundation::{FormId, OwnedByUser, UserId};
use crate::domain::insight::{Insight, InsightError};
use crate::ports::{FormRepository, InsightGenerator, InsightRepository};

#[derive(Debug, Clone)]
pub struct GenerateSummaryCommand {
    pub owner: UserId,
    pub form_id: FormId,
}

/// Handler for executive summaries. Requires insights to exist already.
pub struct GenerateSummaryHandler {
    forms: Arc<dyn FormRepository>,
    insights: Arc<dyn InsightRepository>,
    generator: Arc<dyn InsightGenerator>,
}

impl GenerateSummaryHandler {
    pub fn new(
        forms: Arc<dyn FormRepository>,
        insights: Arc<dyn InsightRepository>,
        generator: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            forms,
            insights,
            generator,
        }
    }

    pub async fn handle(&self, cmd: GenerateSummaryCommand) -> Result<Insight, InsightError> {
        let form = self
            .forms
            .find_by_id(&cmd.form_id)
            .await?
            .ok_or(InsightError::FormNotFound(cmd.form_id))?;
        form.check_ownership(&cmd.owner)?;

        let mut insight = self
            .insights
            .find_by_form(&cmd.form_id)
            .await?
            .ok_or(InsightError::NotFound(cmd.form_id))?;

        let summary = self.generator.write_summary(&form, &insight).await?;
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(InsightError::malformed("summary was empty"));
        }

        insight.set_executive_summary(summary);
        self.insights.upsert(&insight).await?;
        tracing::info!(form_id = %cmd.form_id, "executive summary written");

        Ok(insight)
    }
}
