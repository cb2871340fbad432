//! Password reset token repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::PasswordResetToken;
use crate::errors::DomainError;

/// Persistence for password reset tokens, at most one per account
#[async_trait]
pub trait PasswordResetTokenRepository: Send + Sync {
    /// Find a token by its opaque value
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, DomainError>;

    /// Find the token owned by an account
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PasswordResetToken>, DomainError>;

    /// Insert the token, or overwrite the row with the same id
    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError>;

    /// Delete the token owned by an account; `Ok(false)` if there was none
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
