//! Donation repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Donation;
use crate::errors::DomainError;

/// Persistence for donations and their category links
#[async_trait]
pub trait DonationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DomainError>;

    /// All donations in submission order
    async fn find_all(&self) -> Result<Vec<Donation>, DomainError>;

    /// Donations submitted by an account, in submission order
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Donation>, DomainError>;

    /// Donations linked to a category
    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<Donation>, DomainError>;

    /// Donations addressed to an institution
    async fn find_by_institution_id(
        &self,
        institution_id: Uuid,
    ) -> Result<Vec<Donation>, DomainError>;

    /// Insert or overwrite by id, replacing the category links
    async fn save(&self, donation: Donation) -> Result<Donation, DomainError>;

    /// Delete a donation together with its category links
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Number of donations
    async fn count(&self) -> Result<u64, DomainError>;

    /// Total number of bags over all donations
    async fn sum_quantity(&self) -> Result<u64, DomainError>;
}
