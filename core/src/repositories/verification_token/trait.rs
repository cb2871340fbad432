//! Verification token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::VerificationToken;
use crate::errors::DomainError;

/// Persistence for registration verification tokens.
///
/// An account owns at most one token; resending overwrites that row.
#[async_trait]
pub trait VerificationTokenRepository: Send + Sync {
    /// Find a token by its opaque value
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - Token found
    /// * `Ok(None)` - No token has this value (never issued or superseded)
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError>;

    /// Find the token owned by an account
    async fn find_by_user_id(&self, user_id: Uuid)
        -> Result<Option<VerificationToken>, DomainError>;

    /// Insert the token, or overwrite the row with the same id
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The stored token
    /// * `Err(DomainError)` - The account already owns a different token, or storage failed
    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError>;

    /// Delete the token owned by an account; `Ok(false)` if there was none
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
