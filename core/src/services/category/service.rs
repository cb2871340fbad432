use std::sync::Arc;
use uuid::Uuid;

use gh_shared::validation::validators;

use crate::domain::entities::Category;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::repositories::{CategoryRepository, DonationRepository};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    donations: Arc<dyn DonationRepository>,
    messages: Messages,
}

impl CategoryService {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        donations: Arc<dyn DonationRepository>,
        messages: Messages,
    ) -> Self {
        Self {
            categories,
            donations,
            messages,
        }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Category>> {
        self.categories.find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.category.notfound"))
    }

    pub async fn create(&self, name: &str) -> DomainResult<Category> {
        self.check_name(name)?;
        let category = self.categories.save(Category::new(name.trim())).await?;
        tracing::info!(category_id = %category.id, event = "category_created", "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, name: &str) -> DomainResult<Category> {
        self.check_name(name)?;
        let mut category = self.find_by_id(id).await?;
        category.name = name.trim().to_string();
        self.categories.save(category).await
    }

    /// Delete a category and detach it from its donations
    ///
    /// Every donation is checked before anything changes: a donation must
    /// keep at least one category.
    ///
    /// # Returns
    /// * `Err(DomainError::EntityDeletion)` - The category is the only one of some donation
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let category = self.find_by_id(id).await?;
        let donations = self.donations.find_by_category_id(category.id).await?;

        if donations.iter().any(|d| d.has_sole_category(category.id)) {
            tracing::warn!(category_id = %category.id, event = "category_in_use", "Refused to delete category");
            return Err(self.messages.entity_deletion("error.category.in.use"));
        }

        for mut donation in donations {
            donation.detach_category(category.id);
            self.donations.save(donation).await?;
        }
        self.categories.delete(category.id).await?;

        tracing::info!(category_id = %category.id, event = "category_deleted", "Category deleted");
        Ok(())
    }

    fn check_name(&self, name: &str) -> DomainResult<()> {
        if validators::not_empty(name) {
            Ok(())
        } else {
            Err(self.messages.field_error("name", "validation.required"))
        }
    }
}
