//! Domain entities representing core business objects.

pub mod category;
pub mod donation;
pub mod institution;
pub mod password_reset_token;
pub mod user;
pub mod verification_token;

// Re-export commonly used types
pub use category::Category;
pub use donation::{Donation, DonationSort};
pub use institution::Institution;
pub use password_reset_token::PasswordResetToken;
pub use user::{Role, User, UserProfile};
pub use verification_token::{generate_token_value, VerificationToken, DEFAULT_TOKEN_VALIDITY_MINUTES};
