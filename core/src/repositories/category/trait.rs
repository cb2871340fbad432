//! Category repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Category;
use crate::errors::DomainError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All category rows ordered by name
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError>;

    /// Insert or overwrite by id
    async fn save(&self, category: Category) -> Result<Category, DomainError>;

    /// `Ok(false)` when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
