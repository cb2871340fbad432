//! Error types for token validation, authentication and mail delivery
//!
//! Token and authentication errors carry a localized title and message
//! resolved when the error is raised, so the presentation layer only has to
//! pick the HTTP status.

use thiserror::Error;

/// Failures while resolving or validating a verification token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("{title}: {message}")]
    NotFound { title: String, message: String },

    /// Carries the expired token so the client can request a resend
    #[error("{title}: {message}")]
    AlreadyExpired {
        title: String,
        message: String,
        token: String,
    },

    #[error("{title}: {message}")]
    AlreadyConsumed { title: String, message: String },
}

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{title}: {message}")]
    BadCredentials { title: String, message: String },

    #[error("{title}: {message}")]
    AccountDisabled { title: String, message: String },

    #[error("{title}: {message}")]
    AccountBlocked { title: String, message: String },

    #[error("{title}: {message}")]
    Unauthenticated { title: String, message: String },

    #[error("{title}: {message}")]
    Forbidden { title: String, message: String },
}

/// Errors reported by a mail transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    /// Delivery failed (connection, authentication, rejected recipient)
    #[error("Mail transport failure: {0}")]
    Transport(String),

    /// The message could not be built (bad address, bad header)
    #[error("Mail encoding failure: {0}")]
    Encoding(String),
}
