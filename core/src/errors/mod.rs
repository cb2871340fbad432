//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, MailError, TokenError};

use gh_shared::ValidationErrors;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{title}: {message}")]
    ResourceNotFound { title: String, message: String },

    /// A delete or role change would break a business invariant
    #[error("{title}: {message}")]
    EntityDeletion { title: String, message: String },

    /// Sending a notification failed after the state change was stored
    #[error("{title}: {message}")]
    Mail { title: String, message: String },

    #[error("Validation error: {errors}")]
    Validation {
        title: String,
        message: String,
        errors: ValidationErrors,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Localized headline; empty for internal errors
    pub fn title(&self) -> &str {
        match self {
            DomainError::ResourceNotFound { title, .. }
            | DomainError::EntityDeletion { title, .. }
            | DomainError::Mail { title, .. }
            | DomainError::Validation { title, .. } => title,
            DomainError::Internal { .. } => "",
            DomainError::Token(e) => match e {
                TokenError::NotFound { title, .. }
                | TokenError::AlreadyExpired { title, .. }
                | TokenError::AlreadyConsumed { title, .. } => title,
            },
            DomainError::Auth(e) => match e {
                AuthError::BadCredentials { title, .. }
                | AuthError::AccountDisabled { title, .. }
                | AuthError::AccountBlocked { title, .. }
                | AuthError::Unauthenticated { title, .. }
                | AuthError::Forbidden { title, .. } => title,
            },
        }
    }

    /// Localized message
    pub fn message(&self) -> &str {
        match self {
            DomainError::ResourceNotFound { message, .. }
            | DomainError::EntityDeletion { message, .. }
            | DomainError::Mail { message, .. }
            | DomainError::Validation { message, .. }
            | DomainError::Internal { message } => message,
            DomainError::Token(e) => match e {
                TokenError::NotFound { message, .. }
                | TokenError::AlreadyExpired { message, .. }
                | TokenError::AlreadyConsumed { message, .. } => message,
            },
            DomainError::Auth(e) => match e {
                AuthError::BadCredentials { message, .. }
                | AuthError::AccountDisabled { message, .. }
                | AuthError::AccountBlocked { message, .. }
                | AuthError::Unauthenticated { message, .. }
                | AuthError::Forbidden { message, .. } => message,
            },
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_message_accessors() {
        let error: DomainError = TokenError::AlreadyExpired {
            title: "Link expired".to_string(),
            message: "Request a new one".to_string(),
            token: "abc".to_string(),
        }
        .into();

        assert_eq!(error.title(), "Link expired");
        assert_eq!(error.message(), "Request a new one");
        assert_eq!(error.to_string(), "Link expired: Request a new one");
    }

    #[test]
    fn test_internal_error_has_no_title() {
        let error = DomainError::internal("pool closed");
        assert_eq!(error.title(), "");
        assert_eq!(error.message(), "pool closed");
    }

    #[test]
    fn test_validation_error_display_lists_fields() {
        let error = DomainError::Validation {
            title: "Invalid data".to_string(),
            message: "Fix fields".to_string(),
            errors: ValidationErrors::single("email", "taken", "email_taken"),
        };
        assert_eq!(error.to_string(), "Validation error: invalid fields: email");
    }
}
