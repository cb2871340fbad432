//! Builders shared by service tests

use chrono::{Duration, NaiveTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use gh_shared::{Language, MessageCatalog};

use crate::domain::entities::Donation;
use crate::i18n::Messages;

pub fn messages() -> Messages {
    Messages::new(
        Arc::new(MessageCatalog::embedded().unwrap()),
        Language::English,
    )
}

/// Unreceived donation picked up a week from now
pub fn donation(user_id: Option<Uuid>, category_ids: Vec<Uuid>, quantity: i32) -> Donation {
    Donation {
        id: Uuid::new_v4(),
        quantity,
        street: "Prosta 51".to_string(),
        city: "Warszawa".to_string(),
        zip_code: "00-001".to_string(),
        pick_up_date: (Utc::now() + Duration::days(7)).date_naive(),
        pick_up_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        pick_up_comment: None,
        phone_number: "123456789".to_string(),
        category_ids,
        institution_id: None,
        user_id,
        created_at: Utc::now(),
        received: false,
        received_at: None,
    }
}
