//! Account registration and verification link resend

mod service;


pub use service::{RegistrationRequest, RegistrationService};
