//! In-memory implementation of DonationRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Donation;
use crate::errors::DomainError;

use super::trait_::DonationRepository;

#[derive(Clone, Default)]
pub struct MockDonationRepository {
    donations: Arc<RwLock<HashMap<Uuid, Donation>>>,
}

impl MockDonationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn select<F>(&self, filter: F) -> Vec<Donation>
    where
        F: Fn(&Donation) -> bool,
    {
        let donations = self.donations.read().await;
        let mut selected: Vec<Donation> = donations.values().filter(|d| filter(d)).cloned().collect();
        selected.sort_by_key(|d| d.created_at);
        selected
    }
}

#[async_trait]
impl DonationRepository for MockDonationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donation>, DomainError> {
        let donations = self.donations.read().await;
        Ok(donations.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Donation>, DomainError> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Donation>, DomainError> {
        Ok(self.select(|d| d.is_owned_by(user_id)).await)
    }

    async fn find_by_category_id(&self, category_id: Uuid) -> Result<Vec<Donation>, DomainError> {
        Ok(self.select(|d| d.has_category(category_id)).await)
    }

    async fn find_by_institution_id(
        &self,
        institution_id: Uuid,
    ) -> Result<Vec<Donation>, DomainError> {
        Ok(self
            .select(|d| d.institution_id == Some(institution_id))
            .await)
    }

    async fn save(&self, donation: Donation) -> Result<Donation, DomainError> {
        let mut donations = self.donations.write().await;
        donations.insert(donation.id, donation.clone());
        Ok(donation)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut donations = self.donations.write().await;
        Ok(donations.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.donations.read().await.len() as u64)
    }

    async fn sum_quantity(&self) -> Result<u64, DomainError> {
        let donations = self.donations.read().await;
        Ok(donations.values().map(|d| d.quantity.max(0) as u64).sum())
    }
}
