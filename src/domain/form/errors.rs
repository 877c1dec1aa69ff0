//! Form-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, FormId, ValidationError};

/// Form-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Form was not found.
    NotFound(FormId),
    /// User does not own the form.
    Forbidden,
    /// Form exists but is not published.
    NotAcceptingResponses(FormId),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The AI form generator failed or produced an unusable form.
    GenerationFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl FormError {
    pub fn not_found(id: FormId) -> Self {
        FormError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        FormError::Forbidden
    }
    pub fn not_accepting_responses(id: FormId) -> Self {
        FormError::NotAcceptingResponses(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FormError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn generation_failed(message: impl Into<String>) -> Self {
        FormError::GenerationFailed(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        FormError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            FormError::NotFound(_) => ErrorCode::FormNotFound,
            FormError::Forbidden => ErrorCode::Forbidden,
            FormError::NotAcceptingResponses(_) => ErrorCode::FormNotPublished,
            FormError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FormError::GenerationFailed(_) => ErrorCode::AIProviderError,
            FormError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            FormError::NotFound(id) => format!("Form not found: {}", id),
            FormError::Forbidden => "Permission denied".to_string(),
            FormError::NotAcceptingResponses(_) => {
                "This form is not accepting responses".to_string()
            }
            FormError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FormError::GenerationFailed(msg) => format!("Form generation failed: {}", msg),
            FormError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FormError {}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for FormError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::FormNotFound => match form_id_detail(&err) {
                Some(id) => FormError::NotFound(id),
                None => FormError::Infrastructure(err.to_string()),
            },
            ErrorCode::FormNotPublished => match form_id_detail(&err) {
                Some(id) => FormError::NotAcceptingResponses(id),
                None => FormError::Infrastructure(err.to_string()),
            },
            ErrorCode::Forbidden => FormError::Forbidden,
            ErrorCode::ValidationFailed => FormError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => FormError::Infrastructure(err.to_string()),
        }
    }
}

fn form_id_detail(err: &DomainError) -> Option<FormId> {
    err.details.get("form_id").and_then(|id| id.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_categories() {
        let id = FormId::new();
        assert_eq!(FormError::not_found(id).code(), ErrorCode::FormNotFound);
        assert_eq!(
            FormError::not_accepting_responses(id).code(),
            ErrorCode::FormNotPublished
        );
        assert_eq!(FormError::forbidden().code(), ErrorCode::Forbidden);
    }

    #[test]
    fn forbidden_domain_error_converts() {
        let err = DomainError::new(ErrorCode::Forbidden, "nope");
        assert_eq!(FormError::from(err), FormError::Forbidden);
    }

    #[test]
    fn not_found_domain_error_recovers_form_id() {
        let id = FormId::new();
        let err = DomainError::new(ErrorCode::FormNotFound, "gone")
            .with_detail("form_id", id.to_string());
        assert_eq!(FormError::from(err), FormError::NotFound(id));
    }

    #[test]
    fn validation_error_keeps_field() {
        let err: FormError = ValidationError::empty_field("title").into();
        assert!(matches!(err, FormError::ValidationFailed { ref field, .. } if field == "title"));
    }
}
