//! Verification and password reset token services
//!
//! These services persist tokens and resolve token values to entities.
//! Validation rules (consumed, expired) live in the user service.

mod service;


pub use service::{PasswordResetTokenService, VerificationTokenService};
