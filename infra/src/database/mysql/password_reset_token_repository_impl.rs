//! MySQL implementation of the PasswordResetTokenRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use gh_core::domain::entities::PasswordResetToken;
use gh_core::errors::DomainError;
use gh_core::repositories::PasswordResetTokenRepository;

use super::{column, db_error, uuid_column};

pub struct MySqlPasswordResetTokenRepository {
    pool: MySqlPool,
}

impl MySqlPasswordResetTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &MySqlRow) -> Result<PasswordResetToken, DomainError> {
        Ok(PasswordResetToken {
            id: uuid_column(row, "id")?,
            token: column(row, "token")?,
            user_id: uuid_column(row, "user_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            expires_at: column::<DateTime<Utc>>(row, "expires_at")?,
            consumed: column(row, "consumed")?,
        })
    }

    async fn find_where(&self, condition: &str, value: String) -> Result<Option<PasswordResetToken>, DomainError> {
        let query = format!(
            "SELECT id, token, user_id, created_at, expires_at, consumed FROM password_reset_tokens WHERE {} LIMIT 1",
            condition
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find password reset token"))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }
}

#[async_trait]
impl PasswordResetTokenRepository for MySqlPasswordResetTokenRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<PasswordResetToken>, DomainError> {
        self.find_where("token = ?", token.to_string()).await
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<PasswordResetToken>, DomainError> {
        self.find_where("user_id = ?", user_id.to_string()).await
    }

    async fn save(&self, token: PasswordResetToken) -> Result<PasswordResetToken, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (id, token, user_id, created_at, expires_at, consumed)
            VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                token = VALUES(token),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at),
                consumed = VALUES(consumed)
            "#,
        )
        .bind(token.id.to_string())
        .bind(&token.token)
        .bind(token.user_id.to_string())
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.consumed)
        .execute(&self.pool)
        .await
        .map_err(db_error("save password reset token"))?;

        Ok(token)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete password reset token"))?;

        Ok(result.rows_affected() > 0)
    }
}
