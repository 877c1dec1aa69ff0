//! Insight generator port: LLM analysis of collected responses.

use async_trait::async_trait;

use crate::domain::form::Form;
use crate::domain::insight::{Insight, InsightError, InsightPayload};
use crate::domain::response::ResponseRecord;

#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Analyze `responses` to `form` into a structured payload.
    ///
    /// # Errors
    ///
    /// - `MalformedPayload` if the model output is not a JSON object
    /// - `GenerationFailed` if the provider call fails
    async fn generate_insights(
        &self,
        form: &Form,
        responses: &[ResponseRecord],
    ) -> Result<InsightPayload, InsightError>;

    /// Write a short plain-text executive summary of an existing insight.
    async fn write_summary(&self, form: &Form, insight: &Insight) -> Result<String, InsightError>;
}
