//! MySQL repository implementations
//!
//! Ids are stored as `CHAR(36)` strings and timestamps as `DATETIME(6)` in UTC.

mod category_repository_impl;
mod donation_repository_impl;
mod institution_repository_impl;
mod password_reset_token_repository_impl;
mod user_repository_impl;
mod verification_token_repository_impl;

pub use category_repository_impl::MySqlCategoryRepository;
pub use donation_repository_impl::MySqlDonationRepository;
pub use institution_repository_impl::MySqlInstitutionRepository;
pub use password_reset_token_repository_impl::MySqlPasswordResetTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_token_repository_impl::MySqlVerificationTokenRepository;

use sqlx::mysql::{MySql, MySqlRow};
use sqlx::Row;
use uuid::Uuid;

use gh_core::errors::DomainError;

/// Map a driver error to `DomainError::Internal`, logging the failed operation
pub(crate) fn db_error(operation: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(operation = operation, error = %e, "Database operation failed");
        DomainError::internal(format!("Failed to {}: {}", operation, e))
    }
}

/// Read a column, mapping decode failures to `DomainError::Internal`
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name)
        .map_err(|e| DomainError::internal(format!("Failed to get {}: {}", name, e)))
}

pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
}

pub(crate) fn optional_uuid_column(row: &MySqlRow, name: &str) -> Result<Option<Uuid>, DomainError> {
    let raw: Option<String> = column(row, name)?;
    raw.map(|r| {
        Uuid::parse_str(&r).map_err(|e| DomainError::internal(format!("Invalid UUID in {}: {}", name, e)))
    })
    .transpose()
}
