//! Response repository port.
//!
//! Submissions are append-only. Appending a response and bumping the form's
//! response counter happen as one atomic unit so concurrent respondents
//! never lose a count or interleave records.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, FormId};
use crate::domain::response::ResponseRecord;

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Append a response and increment its form's response count.
    ///
    /// # Errors
    ///
    /// - `FormNotFound` if the form no longer exists
    /// - `DatabaseError` on persistence failure
    async fn append(&self, response: &ResponseRecord) -> Result<(), DomainError>;

    /// All responses for a form, newest first.
    async fn find_by_form(&self, form_id: &FormId) -> Result<Vec<ResponseRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ResponseRepository) {}
    }
}
