//! PostgreSQL implementation of ResponseRepository.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, FormId, ResponseId, Timestamp};
use crate::domain::response::{AnswerRecord, ResponseMetadata, ResponseRecord};
use crate::ports::ResponseRepository;

use super::{db_error, form_not_found};

/// PostgreSQL implementation of ResponseRepository.
#[derive(Clone)]
pub struct PostgresResponseRepository {
    pool: PgPool,
}

impl PostgresResponseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResponseRepository for PostgresResponseRepository {
    /// Inserts the response and bumps the form's counter in one transaction.
    async fn append(&self, response: &ResponseRecord) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let counted = sqlx::query(
            "UPDATE forms SET response_count = response_count + 1 WHERE id = $1",
        )
        .bind(response.form_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to count response"))?;

        if counted.rows_affected() == 0 {
            return Err(form_not_found(&response.form_id));
        }

        sqlx::query(
            r#"
            INSERT INTO responses (
                id, form_id, session_id, answers, respondent_name, respondent_email,
                metadata, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(response.id.as_uuid())
        .bind(response.form_id.as_uuid())
        .bind(&response.session_id)
        .bind(Json(&response.answers))
        .bind(response.respondent_name.as_deref())
        .bind(response.respondent_email.as_deref())
        .bind(Json(&response.metadata))
        .bind(response.submitted_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(db_error("Failed to insert response"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit response"))?;
        Ok(())
    }

    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<ResponseRecord>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, form_id, session_id, answers, respondent_name, respondent_email,
                   metadata, submitted_at
            FROM responses
            WHERE form_id = $1
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(form_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch responses"))?;

        rows.into_iter().map(row_to_response).collect()
    }
}

fn row_to_response(row: sqlx::postgres::PgRow) -> Result<ResponseRecord, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error("Failed to get id"))?;
    let form_id: uuid::Uuid = row
        .try_get("form_id")
        .map_err(db_error("Failed to get form_id"))?;
    let answers: Json<Vec<AnswerRecord>> = row
        .try_get("answers")
        .map_err(db_error("Failed to decode answers"))?;
    let metadata: Json<ResponseMetadata> = row
        .try_get("metadata")
        .map_err(db_error("Failed to decode metadata"))?;
    let submitted_at: chrono::DateTime<chrono::Utc> = row
        .try_get("submitted_at")
        .map_err(db_error("Failed to get submitted_at"))?;

    Ok(ResponseRecord {
        id: ResponseId::from_uuid(id),
        form_id: FormId::from_uuid(form_id),
        session_id: row
            .try_get("session_id")
            .map_err(db_error("Failed to get session_id"))?,
        answers: answers.0,
        respondent_name: row
            .try_get("respondent_name")
            .map_err(db_error("Failed to get respondent_name"))?,
        respondent_email: row
            .try_get("respondent_email")
            .map_err(db_error("Failed to get respondent_email"))?,
        metadata: metadata.0,
        submitted_at: Timestamp::from_datetime(submitted_at),
    })
}
