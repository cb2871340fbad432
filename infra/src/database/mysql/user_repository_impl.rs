//! MySQL implementation of the UserRepository trait.
//!
//! Roles live in `user_roles`; every read joins them and folds the rows back
//! into one [`User`] per account.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Transaction};
use std::collections::BTreeSet;
use uuid::Uuid;

use gh_core::domain::entities::{Role, User, UserProfile};
use gh_core::errors::DomainError;
use gh_core::repositories::UserRepository;

use super::{column, db_error, uuid_column};

const SELECT_USERS: &str = r#"
    SELECT u.id, u.email, u.password_hash, u.enabled, u.blocked, u.registered_at,
           u.first_name, u.last_name, u.city, u.country, u.phone_number, u.profile_photo,
           r.role
    FROM users u
    LEFT JOIN user_roles r ON r.user_id = u.id
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fold joined user/role rows, which must be ordered by user
    fn rows_to_users(rows: &[MySqlRow]) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = Vec::new();

        for row in rows {
            let id = uuid_column(row, "id")?;
            let role: Option<String> = column(row, "role")?;
            let role = role
                .map(|r| r.parse::<Role>().map_err(DomainError::internal))
                .transpose()?;

            match users.last_mut() {
                Some(user) if user.id == id => {
                    if let Some(role) = role {
                        user.roles.insert(role);
                    }
                }
                _ => {
                    let mut user = Self::row_to_user(row, id)?;
                    if let Some(role) = role {
                        user.roles.insert(role);
                    }
                    users.push(user);
                }
            }
        }

        Ok(users)
    }

    fn row_to_user(row: &MySqlRow, id: Uuid) -> Result<User, DomainError> {
        Ok(User {
            id,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            enabled: column(row, "enabled")?,
            blocked: column(row, "blocked")?,
            registered_at: column::<DateTime<Utc>>(row, "registered_at")?,
            roles: BTreeSet::new(),
            profile: UserProfile {
                first_name: column(row, "first_name")?,
                last_name: column(row, "last_name")?,
                city: column(row, "city")?,
                country: column(row, "country")?,
                phone_number: column(row, "phone_number")?,
                profile_photo: column(row, "profile_photo")?,
            },
        })
    }

    async fn fetch_one_where(&self, condition: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE {} ORDER BY r.role", SELECT_USERS, condition);
        let rows = sqlx::query(&query)
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("find user"))?;

        Ok(Self::rows_to_users(&rows)?.into_iter().next())
    }

    async fn replace_roles(
        tx: &mut Transaction<'_, MySql>,
        user: &User,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM user_roles WHERE user_id = ?")
            .bind(user.id.to_string())
            .execute(&mut **tx)
            .await
            .map_err(db_error("clear user roles"))?;

        for role in &user.roles {
            sqlx::query("INSERT INTO user_roles (user_id, role) VALUES (?, ?)")
                .bind(user.id.to_string())
                .bind(role.as_str())
                .execute(&mut **tx)
                .await
                .map_err(db_error("insert user role"))?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("u.id = ?", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        // Column collation is case-insensitive
        self.fetch_one_where("u.email = ?", email.to_string()).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check e-mail"))?;

        let found: i64 = column(&row, "found")?;
        Ok(found == 1)
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("{} ORDER BY u.registered_at, u.id, r.role", SELECT_USERS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list users"))?;

        Self::rows_to_users(&rows)
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<User>, DomainError> {
        let query = format!(
            "{} WHERE u.id IN (SELECT user_id FROM user_roles WHERE role = ?) ORDER BY u.registered_at, u.id, r.role",
            SELECT_USERS
        );
        let rows = sqlx::query(&query)
            .bind(role.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list users by role"))?;

        Self::rows_to_users(&rows)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, enabled, blocked, registered_at,
                first_name, last_name, city, country, phone_number, profile_photo
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.enabled)
        .bind(user.blocked)
        .bind(user.registered_at)
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.city)
        .bind(&user.profile.country)
        .bind(&user.profile.phone_number)
        .bind(&user.profile.profile_photo)
        .execute(&mut *tx)
        .await
        .map_err(db_error("create user"))?;

        Self::replace_roles(&mut tx, &user).await?;
        tx.commit().await.map_err(db_error("commit user"))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = ?, password_hash = ?, enabled = ?, blocked = ?,
                first_name = ?, last_name = ?, city = ?, country = ?,
                phone_number = ?, profile_photo = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.enabled)
        .bind(user.blocked)
        .bind(&user.profile.first_name)
        .bind(&user.profile.last_name)
        .bind(&user.profile.city)
        .bind(&user.profile.country)
        .bind(&user.profile.phone_number)
        .bind(&user.profile.profile_photo)
        .bind(user.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update user"))?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows for an unchanged row too
            let exists = sqlx::query("SELECT id FROM users WHERE id = ?")
                .bind(user.id.to_string())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("update user"))?;
            if exists.is_none() {
                return Err(DomainError::internal(format!("User {} does not exist", user.id)));
            }
        }

        Self::replace_roles(&mut tx, &user).await?;
        tx.commit().await.map_err(db_error("commit user"))?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete user"))?;

        Ok(result.rows_affected() > 0)
    }
}
