//! MySQL implementation of the InstitutionRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;
use uuid::Uuid;

use gh_core::domain::entities::Institution;
use gh_core::errors::DomainError;
use gh_core::repositories::InstitutionRepository;

use super::{column, db_error, uuid_column};

pub struct MySqlInstitutionRepository {
    pool: MySqlPool,
}

impl MySqlInstitutionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_institution(row: &MySqlRow) -> Result<Institution, DomainError> {
        Ok(Institution {
            id: uuid_column(row, "id")?,
            name: column(row, "name")?,
            description: column(row, "description")?,
        })
    }
}

#[async_trait]
impl InstitutionRepository for MySqlInstitutionRepository {
    async fn find_all(&self) -> Result<Vec<Institution>, DomainError> {
        let rows = sqlx::query("SELECT id, name, description FROM institutions ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list institutions"))?;

        rows.iter().map(Self::row_to_institution).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, DomainError> {
        let row = sqlx::query("SELECT id, name, description FROM institutions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("find institution"))?;

        row.as_ref().map(Self::row_to_institution).transpose()
    }

    async fn save(&self, institution: Institution) -> Result<Institution, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO institutions (id, name, description) VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE name = VALUES(name), description = VALUES(description)
            "#,
        )
        .bind(institution.id.to_string())
        .bind(&institution.name)
        .bind(&institution.description)
        .execute(&self.pool)
        .await
        .map_err(db_error("save institution"))?;

        Ok(institution)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM institutions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete institution"))?;

        Ok(result.rows_affected() > 0)
    }
}
