//! In-memory implementation of VerificationTokenRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::VerificationToken;
use crate::errors::DomainError;

use super::trait_::VerificationTokenRepository;

/// In-memory verification token repository keyed by row id
#[derive(Clone, Default)]
pub struct MockVerificationTokenRepository {
    tokens: Arc<RwLock<HashMap<Uuid, VerificationToken>>>,
}

impl MockVerificationTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn count(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl VerificationTokenRepository for MockVerificationTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<VerificationToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.user_id == user_id).cloned())
    }

    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // One token per account
        if tokens
            .values()
            .any(|t| t.user_id == token.user_id && t.id != token.id)
        {
            return Err(DomainError::internal(format!(
                "User {} already owns a verification token",
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
