//! Token lookup and persistence services

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{PasswordResetToken, VerificationToken};
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::repositories::{PasswordResetTokenRepository, VerificationTokenRepository};

/// Registration verification tokens
pub struct VerificationTokenService {
    repository: Arc<dyn VerificationTokenRepository>,
    messages: Messages,
}

impl VerificationTokenService {
    pub fn new(repository: Arc<dyn VerificationTokenRepository>, messages: Messages) -> Self {
        Self {
            repository,
            messages,
        }
    }

    /// Persist a new or reissued token
    pub async fn save_token(&self, token: VerificationToken) -> DomainResult<VerificationToken> {
        let saved = self.repository.save(token).await?;
        tracing::debug!(
            user_id = %saved.user_id,
            expires_at = %saved.expires_at,
            event = "verification_token_saved",
            "Verification token stored"
        );
        Ok(saved)
    }

    /// Resolve a token value, failing with `TokenNotFound` when unknown
    pub async fn find_by_token(&self, token: &str) -> DomainResult<VerificationToken> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| self.messages.token_not_found())
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> DomainResult<Option<VerificationToken>> {
        self.repository.find_by_user_id(user_id).await
    }

    pub async fn delete_by_user_id(&self, user_id: Uuid) -> DomainResult<bool> {
        self.repository.delete_by_user_id(user_id).await
    }
}

/// Password reset tokens
pub struct PasswordResetTokenService {
    repository: Arc<dyn PasswordResetTokenRepository>,
    messages: Messages,
}

impl PasswordResetTokenService {
    pub fn new(repository: Arc<dyn PasswordResetTokenRepository>, messages: Messages) -> Self {
        Self {
            repository,
            messages,
        }
    }

    pub async fn save(&self, token: PasswordResetToken) -> DomainResult<PasswordResetToken> {
        let saved = self.repository.save(token).await?;
        tracing::debug!(
            user_id = %saved.user_id,
            consumed = saved.consumed,
            event = "password_reset_token_saved",
            "Password reset token stored"
        );
        Ok(saved)
    }

    /// Resolve a token value, failing with `TokenNotFound` when unknown
    pub async fn find_by_token(&self, token: &str) -> DomainResult<PasswordResetToken> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| self.messages.token_not_found())
    }

    pub async fn find_by_user_id(&self, user_id: Uuid) -> DomainResult<Option<PasswordResetToken>> {
        self.repository.find_by_user_id(user_id).await
    }

    pub async fn delete_by_user_id(&self, user_id: Uuid) -> DomainResult<bool> {
        self.repository.delete_by_user_id(user_id).await
    }
}
