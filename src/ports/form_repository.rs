//! Form repository port.
//!
//! Persists `Form` aggregates. Forms are read publicly by id (respondents)
//! and listed per owner (dashboard).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FormId, UserId};
use crate::domain::form::Form;

/// Repository port for Form aggregate persistence.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Save a new form.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, form: &Form) -> Result<(), DomainError>;

    /// Update an existing form.
    ///
    /// The stored response count is authoritative and is not overwritten.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, form: &Form) -> Result<(), DomainError>;

    /// Find a form by its ID.
    async fn find_by_id(&self, id: &FormId) -> Result<Option<Form>, DomainError>;

    /// All forms owned by a user, newest first.
    async fn find_by_owner(&self, owner: &UserId) -> Result<Vec<Form>, DomainError>;

    /// Delete a form together with its responses and insight.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form doesn't exist
    async fn delete(&self, id: &FormId) -> Result<(), DomainError>;
}
