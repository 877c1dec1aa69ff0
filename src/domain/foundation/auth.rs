//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what remains of a bearer token after the
//! `SessionValidator` port has verified it. Nothing here knows about JWT.

use super::UserId;
use thiserror::Error;

/// Authenticated form owner extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier (token subject).
    pub id: UserId,

    /// Email claim, when the token carries one.
    pub email: Option<String>,

    /// Display name claim, when the token carries one.
    pub name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Option<String>, name: Option<String>) -> Self {
        Self { id, email, name }
    }

    /// Returns the display name, falling back to email, then the user id.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or_else(|| self.id.as_str())
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// The validator itself could not run (misconfiguration).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the client should obtain a fresh token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn display_name_prefers_name_then_email_then_id() {
        let named = AuthenticatedUser::new(
            uid(),
            Some("a@example.com".to_string()),
            Some("Alice".to_string()),
        );
        assert_eq!(named.display_name(), "Alice");

        let emailed = AuthenticatedUser::new(uid(), Some("a@example.com".to_string()), None);
        assert_eq!(emailed.display_name(), "a@example.com");

        let bare = AuthenticatedUser::new(uid(), None, None);
        assert_eq!(bare.display_name(), "user-123");
    }

    #[test]
    fn token_errors_require_reauthentication() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
