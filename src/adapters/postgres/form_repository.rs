//! PostgreSQL implementation of FormRepository.
//!
//! Questions and settings are stored as JSONB. `response_count` is owned by
//! the response repository, so `update` never writes it.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, FormId, Timestamp, UserId};
use crate::domain::form::{Form, FormSettings, Question};
use crate::ports::FormRepository;

use super::{db_error, form_not_found};

const FORM_COLUMNS: &str = "id, owner_id, title, description, goal, questions, is_published, \
    settings, response_count, created_at, updated_at";

/// PostgreSQL implementation of FormRepository.
#[derive(Clone)]
pub struct PostgresFormRepository {
    pool: PgPool,
}

impl PostgresFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FormRepository for PostgresFormRepository {
    async fn save(&self, form: &Form) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO forms (
                id, owner_id, title, description, goal, questions, is_published,
                settings, response_count, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.owner().as_str())
        .bind(form.title())
        .bind(form.description())
        .bind(form.goal())
        .bind(Json(form.questions()))
        .bind(form.is_published())
        .bind(Json(form.settings()))
        .bind(form.response_count() as i64)
        .bind(form.created_at().as_datetime())
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to insert form"))?;

        Ok(())
    }

    async fn update(&self, form: &Form) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE forms SET
                title = $2,
                description = $3,
                questions = $4,
                is_published = $5,
                settings = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(form.id().as_uuid())
        .bind(form.title())
        .bind(form.description())
        .bind(Json(form.questions()))
        .bind(form.is_published())
        .bind(Json(form.settings()))
        .bind(form.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update form"))?;

        if result.rows_affected() == 0 {
            return Err(form_not_found(form.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM forms WHERE id = $1", FORM_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch form"))?;

        row.map(row_to_form).transpose()
    }

    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Form>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM forms WHERE owner_id = $1 ORDER BY created_at DESC",
            FORM_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to fetch forms by owner"))?;

        rows.into_iter().map(row_to_form).collect()
    }

    async fn delete(&self, id: &FormId) -> Result<(), DomainError> {
        // responses and insights go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete form"))?;

        if result.rows_affected() == 0 {
            return Err(form_not_found(id));
        }
        Ok(())
    }
}

fn row_to_form(row: sqlx::postgres::PgRow) -> Result<Form, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error("Failed to get id"))?;
    let owner: String = row
        .try_get("owner_id")
        .map_err(db_error("Failed to get owner_id"))?;
    let questions: Json<Vec<Question>> = row
        .try_get("questions")
        .map_err(db_error("Failed to decode questions"))?;
    let settings: Json<FormSettings> = row
        .try_get("settings")
        .map_err(db_error("Failed to decode settings"))?;
    let response_count: i64 = row
        .try_get("response_count")
        .map_err(db_error("Failed to get response_count"))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(db_error("Failed to get created_at"))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(db_error("Failed to get updated_at"))?;

    Ok(Form::reconstitute(
        FormId::from_uuid(id),
        UserId::new(owner)
            .map_err(|e| DomainError::database(format!("Invalid owner_id: {}", e)))?,
        row.try_get("title").map_err(db_error("Failed to get title"))?,
        row.try_get("description")
            .map_err(db_error("Failed to get description"))?,
        row.try_get("goal").map_err(db_error("Failed to get goal"))?,
        questions.0,
        row.try_get("is_published")
            .map_err(db_error("Failed to get is_published"))?,
        settings.0,
        response_count.max(0) as u64,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
