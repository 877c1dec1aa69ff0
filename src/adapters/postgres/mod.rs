//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresFormRepository` - forms with JSONB questions and settings
//! - `PostgresResponseRepository` - append-only responses, counted atomically
//! - `PostgresInsightRepository` - latest insight per form
//!
//! The schema lives in `migrations/` and is applied at startup.

mod form_repository;
mod insight_repository;
mod response_repository;

pub use form_repository::PostgresFormRepository;
pub use insight_repository::PostgresInsightRepository;
pub use response_repository::PostgresResponseRepository;

use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, FormId};

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Wraps a driver error with what was being attempted.
fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("{}: {}", context, e))
}

fn form_not_found(id: &FormId) -> DomainError {
    DomainError::new(ErrorCode::FormNotFound, format!("Form not found: {}", id))
        .with_detail("form_id", id.to_string())
}
