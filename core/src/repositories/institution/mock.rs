//! In-memory implementation of InstitutionRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Institution;
use crate::errors::DomainError;

use super::trait_::InstitutionRepository;

#[derive(Clone, Default)]
pub struct MockInstitutionRepository {
    rows: Arc<RwLock<HashMap<Uuid, Institution>>>,
}

impl MockInstitutionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstitutionRepository for MockInstitutionRepository {
    async fn find_all(&self) -> Result<Vec<Institution>, DomainError> {
        let rows = self.rows.read().await;
        let mut all: Vec<Institution> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Institution>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn save(&self, institution: Institution) -> Result<Institution, DomainError> {
        let mut rows = self.rows.write().await;
        rows.insert(institution.id, institution.clone());
        Ok(institution)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&id).is_some())
    }
}
