//! Business services containing domain logic and use cases.

pub mod category;
pub mod contact;
pub mod donation;
pub mod institution;
pub mod notification;
pub mod password;
pub mod registration;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use category::CategoryService;
pub use contact::ContactService;
pub use donation::{DonationService, NewDonation};
pub use institution::InstitutionService;
pub use notification::{
    EventPublisher, MailMessageBuilder, MailSender, MockEventPublisher, MockMailSender,
    NotificationDispatcher,
};
pub use password::{MockPasswordEncoder, PasswordEncoder};
pub use registration::{RegistrationRequest, RegistrationService};
pub use token::{PasswordResetTokenService, VerificationTokenService};
pub use user::UserService;
