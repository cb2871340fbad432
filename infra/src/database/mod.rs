//! Database module - MySQL implementations using SQLx

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use mysql::{
    MySqlCategoryRepository, MySqlDonationRepository, MySqlInstitutionRepository,
    MySqlPasswordResetTokenRepository, MySqlUserRepository, MySqlVerificationTokenRepository,
};
