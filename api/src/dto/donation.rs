use chrono::{NaiveDate, NaiveTime};
use gh_core::services::NewDonation;
use gh_shared::validation::validators;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Donation form submitted by a logged-in donor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DonationRequest {
    #[validate(range(min = 1, code = "validation.quantity"))]
    pub quantity: i32,

    #[validate(length(min = 1, code = "validation.required"))]
    pub street: String,

    #[validate(length(min = 1, code = "validation.required"))]
    pub city: String,

    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: String,

    pub pick_up_date: NaiveDate,

    pub pick_up_time: NaiveTime,

    pub pick_up_comment: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,

    #[validate(length(min = 1, code = "validation.categories"))]
    pub category_ids: Vec<Uuid>,

    pub institution_id: Uuid,
}

impl From<DonationRequest> for NewDonation {
    fn from(request: DonationRequest) -> Self {
        Self {
            quantity: request.quantity,
            street: request.street,
            city: request.city,
            zip_code: request.zip_code,
            pick_up_date: request.pick_up_date,
            pick_up_time: request.pick_up_time,
            pick_up_comment: request.pick_up_comment,
            phone_number: request.phone_number,
            category_ids: request.category_ids,
            institution_id: request.institution_id,
        }
    }
}

/// Figures shown on the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub donations: u64,
    pub bags: u64,
}

pub fn validate_zip_code(zip_code: &str) -> Result<(), ValidationError> {
    if validators::is_valid_zip_code(zip_code) {
        Ok(())
    } else {
        Err(ValidationError::new("validation.zip.code"))
    }
}

pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    if validators::is_valid_phone_number(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("validation.phone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn request() -> DonationRequest {
        DonationRequest {
            quantity: 3,
            street: "Prosta 51".to_string(),
            city: "Warszawa".to_string(),
            zip_code: "00-838".to_string(),
            pick_up_date: Utc::now().date_naive() + Duration::days(3),
            pick_up_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            pick_up_comment: None,
            phone_number: "123456789".to_string(),
            category_ids: vec![Uuid::new_v4()],
            institution_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_rule_codes_are_message_keys() {
        let mut invalid = request();
        invalid.quantity = 0;
        invalid.zip_code = "00838".to_string();
        invalid.category_ids.clear();

        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["quantity"][0].code, "validation.quantity");
        assert_eq!(fields["zip_code"][0].code, "validation.zip.code");
        assert_eq!(fields["category_ids"][0].code, "validation.categories");
        assert!(!fields.contains_key("phone_number"));
    }
}
