//! In-memory implementation of PasswordResetTokenRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::PasswordResetToken;
use crate::errors::DomainError;

use super::trait_::PasswordResetTokenRepository;

#[derive(Clone, Default)]
pub struct MockPasswordResetTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, PasswordResetToken>>>,
}

impl MockPasswordResetTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl PasswordResetTokenRepository for MockPasswordResetTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PasswordResetToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.user_id == user_id).cloned())
    }

    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        if tokens
            .values()
            .any(|t| t.user_id == token.user_id && t.id != token.id)
        {
            return Err(DomainError::internal(format!(
                "User {} already owns a password reset token",
                token.user_id
            )));
        }

        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| t.user_id != user_id);
        Ok(tokens.len() != before)
    }
}
