//! Institution repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Institution;
use crate::errors::DomainError;

#[async_trait]
pub trait InstitutionRepository: Send + Sync {
    /// All institution rows ordered by name
    async fn find_all(&self) -> Result<Vec<Institution>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, DomainError>;

    /// Insert or overwrite by id
    async fn save(&self, institution: Institution) -> Result<Institution, DomainError>;

    /// `Ok(false)` when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
