//! # Good Hands Core
//!
//! Core business logic and domain layer for the Good Hands donation backend.
//! This crate contains domain entities and events, business services,
//! repository interfaces, localized messages and the error types shared by
//! the infrastructure and API crates.

pub mod domain;
pub mod errors;
pub mod i18n;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use i18n::{MessageSource, Messages};
pub use repositories::{
    CategoryRepository, DonationRepository, InstitutionRepository, PasswordResetTokenRepository,
    UserRepository, VerificationTokenRepository,
};
pub use services::{
    CategoryService, ContactService, DonationService, EventPublisher, InstitutionService,
    MailMessageBuilder, MailSender, NotificationDispatcher, PasswordEncoder, RegistrationService,
    UserService,
};
