//! Repository interfaces and their in-memory implementations.

pub mod category;
pub mod donation;
pub mod institution;
pub mod password_reset_token;
pub mod user;
pub mod verification_token;

pub use category::{CategoryRepository, MockCategoryRepository};
pub use donation::{DonationRepository, MockDonationRepository};
pub use institution::{InstitutionRepository, MockInstitutionRepository};
pub use password_reset_token::{MockPasswordResetTokenRepository, PasswordResetTokenRepository};
pub use user::{MockUserRepository, UserRepository};
pub use verification_token::{MockVerificationTokenRepository, VerificationTokenRepository};
