//! MySQL implementation of the CategoryRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use gh_core::domain::entities::Category;
use gh_core::errors::DomainError;
use gh_core::repositories::CategoryRepository;

use super::{column, db_error, uuid_column};

pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_category(row: &MySqlRow) -> Result<Category, DomainError> {
        Ok(Category {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
        })
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list categories"))?;

        rows.iter().map(Self::row_to_category).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find category"))?;

        row.as_ref().map(Self::row_to_category).transpose()
    }

    async fn save(&self, category: Category) -> Result<Category, DomainError> {
        sqlx::query(
            "INSERT INTO categories (id, name) VALUES (?, ?) ON DUPLICATE KEY UPDATE name = VALUES(name)",
        )
        .bind(category.id.to_string())
        .bind(&category.name)
        .execute(&self.pool)
        .await
        .map_err(db_error("save category"))?;

        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete category"))?;

        Ok(result.rows_affected() > 0)
    }
}
