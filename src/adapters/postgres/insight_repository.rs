//! PostgreSQL implementation of InsightRepository.
//!
//! One row per form; regenerating overwrites it.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, FormId, Timestamp};
use crate::domain::insight::{Insight, InsightPayload};
use crate::ports::InsightRepository;

use super::{db_error, form_not_found};

/// PostgreSQL implementation of InsightRepository.
#[derive(Clone)]
pub struct PostgresInsightRepository {
    pool: PgPool,
}

impl PostgresInsightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsightRepository for PostgresInsightRepository {
    async fn upsert(&self, insight: &Insight) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO insights (form_id, total_responses, payload, generated_at)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM forms WHERE id = $1)
            ON CONFLICT (form_id) DO UPDATE SET
                total_responses = EXCLUDED.total_responses,
                payload = EXCLUDED.payload,
                generated_at = EXCLUDED.generated_at
            "#,
        )
        .bind(insight.form_id.as_uuid())
        .bind(insight.total_responses as i64)
        .bind(Json(&insight.payload))
        .bind(insight.generated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to upsert insight"))?;

        if result.rows_affected() == 0 {
            return Err(form_not_found(&insight.form_id));
        }
        Ok(())
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Option<Insight>, DomainError> {
        let row = sqlx::query(
            "SELECT form_id, total_responses, payload, generated_at FROM insights WHERE form_id = $1",
        )
        .bind(form_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to fetch insight"))?;

        row.map(row_to_insight).transpose()
    }

    async fn find_by_forms(&self, form_ids: &[FormId]) -> Result<Vec<Insight>, DomainError> {
        if form_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<uuid::Uuid> = form_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT form_id, total_responses, payload, generated_at
            FROM insights
            WHERE form_id = ANY($1)
            ORDER BY generated_at DESC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch insights"))?;

        rows.into_iter().map(row_to_insight).collect()
    }
}

fn row_to_insight(row: sqlx::postgres::PgRow) -> Result<Insight, DomainError> {
    let form_id: uuid::Uuid = row
        .try_get("form_id")
        .map_err(db_error("Failed to get form_id"))?;
    let total: i64 = row
        .try_get("total_responses")
        .map_err(db_error("Failed to get total_responses"))?;
    let payload: Json<InsightPayload> = row
        .try_get("payload")
        .map_err(db_error("Failed to decode payload"))?;
    let generated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("generated_at")
        .map_err(db_error("Failed to get generated_at"))?;

    Ok(Insight {
        form_id: FormId::from_uuid(form_id),
        total_responses: total.max(0) as u64,
        payload: payload.0,
        generated_at: Timestamp::from_datetime(generated_at),
    })
}
