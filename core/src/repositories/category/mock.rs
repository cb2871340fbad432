//! In-memory implementation of CategoryRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Category;
use crate::errors::DomainError;

use super::trait_::CategoryRepository;

#[derive(Clone, Default)]
pub struct MockCategoryRepository {
    rows: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let rows = self.rows.read().await;
        let mut all: Vec<Category> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&id).cloned())
    }

    async fn save(&self, category: Category) -> Result<Category, DomainError> {
        let mut rows = self.rows.write().await;
        rows.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().await;
        Ok(rows.remove(&id).is_some())
    }
}
