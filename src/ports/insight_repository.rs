//! Insight repository port. One insight per form, replaced on regeneration.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FormId};
use crate::domain::insight::Insight;

#[async_trait]
pub trait InsightRepository: Send + Sync {
    /// Insert or replace the insight for `insight.form_id`.
    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError>;

    async fn find_by_form(&self, form_id: &FormId) -> Result<Option<Insight>, DomainError>;

    /// Insights for any of the given forms, in no particular order.
    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Insight>, DomainError>;
}
