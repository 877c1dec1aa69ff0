//! Ownership trait for user-owned resources.
//!
//! Forms and everything hanging off them (responses, insights) are scoped to
//! the user who created the form. Aggregates implement `OwnedByUser` and
//! handlers call `check_ownership` before mutating or exposing private data.
//!
//! ```ignore
//! let form = self.forms.find_by_id(&cmd.form_id).await?
//!     .ok_or_else(|| DomainError::new(ErrorCode::FormNotFound, "Form not found"))?;
//! form.check_ownership(&cmd.owner)?;  // Err(Forbidden) if not owner
//! ```

use super::{DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning `Forbidden` if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "User does not own this resource",
            )
            .with_detail("owner_id", self.owner_id().to_string())
            .with_detail("requested_by", user_id.to_string()))
        }
    }
}
