//! MySQL implementation of the VerificationTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use gh_core::domain::entities::VerificationToken;
use gh_core::errors::DomainError;
use gh_core::repositories::VerificationTokenRepository;

use super::{column, db_error, uuid_column};

/// MySQL implementation of VerificationTokenRepository
///
/// One row per account; `save` upserts on the row id so a resend keeps
/// the row and replaces its value and expiry.
pub struct MySqlVerificationTokenRepository {
    pool: MySqlPool,
}

impl MySqlVerificationTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &MySqlRow) -> Result<VerificationToken, DomainError> {
        Ok(VerificationToken {
            id: uuid_column(row, "id")?,
            token: column(row, "token")?,
            user_id: uuid_column(row, "user_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            expires_at: column::<DateTime<Utc>>(row, "expires_at")?,
        })
    }

    async fn find_where(&self, condition: &str, value: String) -> Result<Option<VerificationToken>, DomainError> {
        let query = format!(
            "SELECT id, token, user_id, created_at, expires_at FROM verification_tokens WHERE {} LIMIT 1",
            condition
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find verification token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}

#[async_trait]
impl VerificationTokenRepository for MySqlVerificationTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        self.find_where("token = ?", token.to_string()).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<VerificationToken>, DomainError> {
        self.find_where("user_id = ?", user_id.to_string()).await
    }

    async fn save(&self, token: VerificationToken) -> Result<VerificationToken, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO verification_tokens (id, token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                token = VALUES(token),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
            "#,
        )
        .bind(token.id.to_string())
        .bind(&token.token)
        .bind(token.user_id.to_string())
        .bind(token.created_at)
        .bind(token.expires_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("save verification token"))?;

        Ok(token)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM verification_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete verification token"))?;

        Ok(result.rows_affected() > 0)
    }
}
