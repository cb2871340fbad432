//! Domain events published after account and donation state changes.
//!
//! Events are immutable value carriers handled synchronously by exactly one
//! listener. They are never persisted.

use crate::domain::entities::{User, VerificationToken};
use crate::domain::value_objects::DonationDetails;

#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// A new account was stored and needs its first verification mail
    RegistrationComplete { user: User, application_url: String },

    /// A verification link is requested again for an existing token
    ResendToken {
        user: User,
        old_token: VerificationToken,
        application_url: String,
    },

    /// A password reset link was requested
    PasswordReset { user: User, application_url: String },

    /// A donation was submitted
    DonationProcessComplete { user: User, donation: DonationDetails },
}

impl DomainEvent {
    /// Stable name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::RegistrationComplete { .. } => "registration_complete",
            DomainEvent::ResendToken { .. } => "resend_token",
            DomainEvent::PasswordReset { .. } => "password_reset",
            DomainEvent::DonationProcessComplete { .. } => "donation_process_complete",
        }
    }

    /// Account the event concerns
    pub fn user(&self) -> &User {
        match self {
            DomainEvent::RegistrationComplete { user, .. }
            | DomainEvent::ResendToken { user, .. }
            | DomainEvent::PasswordReset { user, .. }
            | DomainEvent::DonationProcessComplete { user, .. } => user,
        }
    }
}
