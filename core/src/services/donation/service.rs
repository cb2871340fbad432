//! Donation service implementation

use chrono::{NaiveDate, NaiveTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use gh_shared::validation::validators;
use gh_shared::ValidationErrors;

use crate::domain::entities::{Donation, DonationSort, User};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::DonationDetails;
use crate::errors::DomainResult;
use crate::i18n::Messages;
use crate::repositories::{CategoryRepository, DonationRepository, InstitutionRepository};
use crate::services::notification::EventPublisher;

/// Donation form
#[derive(Debug, Clone)]
pub struct NewDonation {
    pub quantity: i32,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: NaiveTime,
    pub pick_up_comment: Option<String>,
    pub phone_number: String,
    pub category_ids: Vec<Uuid>,
    pub institution_id: Uuid,
}

pub struct DonationService {
    donations: Arc<dyn DonationRepository>,
    categories: Arc<dyn CategoryRepository>,
    institutions: Arc<dyn InstitutionRepository>,
    publisher: Arc<dyn EventPublisher>,
    messages: Messages,
}

impl DonationService {
    pub fn new(
        donations: Arc<dyn DonationRepository>,
        categories: Arc<dyn CategoryRepository>,
        institutions: Arc<dyn InstitutionRepository>,
        publisher: Arc<dyn EventPublisher>,
        messages: Messages,
    ) -> Self {
        Self {
            donations,
            categories,
            institutions,
            publisher,
            messages,
        }
    }

    /// Store a donation for `donor` and send the thank-you mail
    ///
    /// Repeated category ids are stored once.
    ///
    /// # Returns
    /// * `Err(DomainError::Validation)` - Invalid form
    /// * `Err(DomainError::ResourceNotFound)` - Unknown category or institution
    /// * `Err(DomainError::Mail)` - Donation stored but the mail was not sent
    pub async fn create(&self, donor: &User, mut form: NewDonation) -> DomainResult<DonationDetails> {
        self.validate(&form)?;

        let mut category_ids = Vec::with_capacity(form.category_ids.len());
        for id in form.category_ids.drain(..) {
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }
        form.category_ids = category_ids;

        let mut categories = Vec::with_capacity(form.category_ids.len());
        for id in &form.category_ids {
            let category = self
                .categories
                .find_by_id(*id)
                .await?
                .ok_or_else(|| self.messages.resource_not_found("error.category.notfound"))?;
            categories.push(category);
        }
        let institution = self
            .institutions
            .find_by_id(form.institution_id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.institution.notfound"))?;

        let donation = Donation {
            id: Uuid::new_v4(),
            quantity: form.quantity,
            street: form.street.trim().to_string(),
            city: form.city.trim().to_string(),
            zip_code: form.zip_code.trim().to_string(),
            pick_up_date: form.pick_up_date,
            pick_up_time: form.pick_up_time,
            pick_up_comment: form
                .pick_up_comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            phone_number: form.phone_number.trim().to_string(),
            category_ids: form.category_ids,
            institution_id: Some(institution.id),
            user_id: Some(donor.id),
            created_at: Utc::now(),
            received: false,
            received_at: None,
        };
        let donation = self.donations.save(donation).await?;
        tracing::info!(
            donation_id = %donation.id,
            user_id = %donor.id,
            quantity = donation.quantity,
            event = "donation_created",
            "Donation submitted"
        );

        let details = DonationDetails {
            donation,
            institution: Some(institution),
            categories,
        };
        self.publisher
            .publish(DomainEvent::DonationProcessComplete {
                user: donor.clone(),
                donation: details.clone(),
            })
            .await?;

        Ok(details)
    }

    fn validate(&self, form: &NewDonation) -> DomainResult<()> {
        let today = Utc::now().date_naive();
        let checks = [
            ("quantity", form.quantity >= 1, "validation.quantity"),
            ("category_ids", !form.category_ids.is_empty(), "validation.categories"),
            ("street", validators::not_empty(&form.street), "validation.required"),
            ("city", validators::not_empty(&form.city), "validation.required"),
            ("zip_code", validators::is_valid_zip_code(form.zip_code.trim()), "validation.zip.code"),
            ("phone_number", validators::is_valid_phone_number(form.phone_number.trim()), "validation.phone"),
            ("pick_up_date", form.pick_up_date > today, "validation.pickup.date"),
        ];

        let mut errors = ValidationErrors::new();
        for (field, valid, key) in checks {
            if !valid {
                errors.add_error(field, self.messages.get(key), key);
            }
        }
        errors
            .into_result()
            .map_err(|errors| self.messages.validation(errors))
    }

    /// Donations of `user_id` ordered by the user's sort option
    pub async fn find_user_donations(
        &self,
        user_id: Uuid,
        sort: Option<&str>,
    ) -> DomainResult<Vec<Donation>> {
        let mut donations = self.donations.find_by_user_id(user_id).await?;
        DonationSort::for_user(sort).apply(&mut donations);
        Ok(donations)
    }

    /// A donation of `user_id`; donations of other users are reported as missing
    pub async fn find_user_donation(
        &self,
        user_id: Uuid,
        donation_id: Uuid,
    ) -> DomainResult<DonationDetails> {
        let donation = self.find_owned(user_id, donation_id).await?;
        self.details(donation).await
    }

    /// Mark a donation of `user_id` as received
    pub async fn archive_user_donation(
        &self,
        user_id: Uuid,
        donation_id: Uuid,
    ) -> DomainResult<Donation> {
        let mut donation = self.find_owned(user_id, donation_id).await?;
        donation.archive();
        self.donations.save(donation).await
    }

    async fn find_owned(&self, user_id: Uuid, donation_id: Uuid) -> DomainResult<Donation> {
        self.donations
            .find_by_id(donation_id)
            .await?
            .filter(|d| d.is_owned_by(user_id))
            .ok_or_else(|| self.messages.resource_not_found("error.donation.notfound"))
    }

    /// All donations ordered by the administrator's sort option
    pub async fn find_all(&self, sort: Option<&str>) -> DomainResult<Vec<Donation>> {
        let mut donations = self.donations.find_all().await?;
        DonationSort::for_admin(sort).apply(&mut donations);
        Ok(donations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Donation> {
        self.donations
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.resource_not_found("error.donation.notfound"))
    }

    pub async fn find_details(&self, id: Uuid) -> DomainResult<DonationDetails> {
        let donation = self.find_by_id(id).await?;
        self.details(donation).await
    }

    pub async fn archive(&self, id: Uuid) -> DomainResult<Donation> {
        let mut donation = self.find_by_id(id).await?;
        donation.archive();
        self.donations.save(donation).await
    }

    pub async fn unarchive(&self, id: Uuid) -> DomainResult<Donation> {
        let mut donation = self.find_by_id(id).await?;
        donation.unarchive();
        self.donations.save(donation).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let donation = self.find_by_id(id).await?;
        self.donations.delete(donation.id).await?;
        tracing::info!(donation_id = %donation.id, event = "donation_deleted", "Donation deleted");
        Ok(())
    }

    /// Number of donations
    pub async fn count(&self) -> DomainResult<u64> {
        self.donations.count().await
    }

    /// Total bags over all donations
    pub async fn bags(&self) -> DomainResult<u64> {
        self.donations.sum_quantity().await
    }

    /// Resolve referenced entities; dangling references are skipped
    pub async fn details(&self, donation: Donation) -> DomainResult<DonationDetails> {
        let institution = match donation.institution_id {
            Some(id) => self.institutions.find_by_id(id).await?,
            None => None,
        };
        let mut categories = Vec::with_capacity(donation.category_ids.len());
        for id in &donation.category_ids {
            if let Some(category) = self.categories.find_by_id(*id).await? {
                categories.push(category);
            }
        }

        Ok(DonationDetails {
            donation,
            institution,
            categories,
        })
    }
}
