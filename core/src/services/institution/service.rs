use std::sync::Arc;
use uuid::Uuid;

use gh_shared::validation::validators;
use gh_shared::ValidationErrors;

use crate::domain::entities::Institution;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::repositories::{DonationRepository, InstitutionRepository};

pub struct InstitutionService {
    institutions: Arc<dyn InstitutionRepository>,
    donations: Arc<dyn DonationRepository>,
    messages: Messages,
}

impl InstitutionService {
    pub fn new(
        institutions: Arc<dyn InstitutionRepository>,
        donations: Arc<dyn DonationRepository>,
        messages: Messages,
    ) -> Self {
        Self {
            institutions,
            donations,
            messages,
        }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Institution>> {
        self.institutions.find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Institution> {
        self.institutions
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.institution.notfound"))
    }

    pub async fn create(&self, name: &str, description: &str) -> DomainResult<Institution> {
        self.check(name, description)?;
        let institution = self
            .institutions
            .save(Institution::new(name.trim(), description.trim()))
            .await?;
        tracing::info!(institution_id = %institution.id, event = "institution_created", "Institution created");
        Ok(institution)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
    ) -> DomainResult<Institution> {
        self.check(name, description)?;
        let mut institution = self.find_by_id(id).await?;
        institution.name = name.trim().to_string();
        institution.description = description.trim().to_string();
        self.institutions.save(institution).await
    }

    /// Delete an institution; its donations are kept without a recipient
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let institution = self.find_by_id(id).await?;

        for mut donation in self.donations.find_by_institution_id(institution.id).await? {
            donation.institution_id = None;
            self.donations.save(donation).await?;
        }
        self.institutions.delete(institution.id).await?;

        tracing::info!(institution_id = %institution.id, event = "institution_deleted", "Institution deleted");
        Ok(())
    }

    fn check(&self, name: &str, description: &str) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [("name", name), ("description", description)] {
            if !validators::not_empty(value) {
                errors.add_error(field, self.messages.get("validation.required"), "validation.required");
            }
        }
        errors
            .into_result()
            .map_err(|errors| self.messages.validation(errors))
    }
}
