//! Donation pickup request entity and list ordering.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use uuid::Uuid;

/// A request to pick up bags of goods for an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    pub id: Uuid,

    /// Number of bags
    pub quantity: i32,

    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub pick_up_date: NaiveDate,
    pub pick_up_time: NaiveTime,
    pub pick_up_comment: Option<String>,
    pub phone_number: String,

    /// Categories of the donated goods, at least one
    pub category_ids: Vec<Uuid>,

    /// Receiving institution; cleared when the institution is deleted
    pub institution_id: Option<Uuid>,

    /// Donor; cleared when the account is deleted
    pub user_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,

    /// Archived (goods received)
    pub received: bool,
    pub received_at: Option<DateTime<Utc>>,
}

impl Donation {
    /// Marks the donation as received now
    pub fn archive(&mut self) {
        self.received = true;
        self.received_at = Some(Utc::now());
    }

    pub fn unarchive(&mut self) {
        self.received = false;
        self.received_at = None;
    }

    pub fn has_category(&self, category_id: Uuid) -> bool {
        self.category_ids.contains(&category_id)
    }

    /// `category_id` is the one and only category of this donation
    pub fn has_sole_category(&self, category_id: Uuid) -> bool {
        !self.category_ids.is_empty() && self.category_ids.iter().all(|id| *id == category_id)
    }

    /// Removes `category_id`; returns whether anything changed
    pub fn detach_category(&mut self, category_id: Uuid) -> bool {
        let before = self.category_ids.len();
        self.category_ids.retain(|id| *id != category_id);
        before != self.category_ids.len()
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Ordering options for donation lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationSort {
    /// Submission order, oldest first
    Submitted,
    /// Newest first
    CreatedDesc,
    QuantityDesc,
    QuantityAsc,
    /// Not yet received first
    ReceivedAsc,
    /// Received first
    ReceivedDesc,
}

impl DonationSort {
    /// Ordering for a donor's own list.
    ///
    /// No option keeps submission order, an unknown option shows received
    /// donations first.
    pub fn for_user(option: Option<&str>) -> Self {
        match option.map(|o| o.trim().to_lowercase()) {
            None => DonationSort::Submitted,
            Some(o) => match o.as_str() {
                "created" => DonationSort::CreatedDesc,
                "quantity desc" => DonationSort::QuantityDesc,
                "quantity asc" => DonationSort::QuantityAsc,
                "received asc" => DonationSort::ReceivedAsc,
                _ => DonationSort::ReceivedDesc,
            },
        }
    }

    /// Ordering for the administrator list; defaults to newest first
    pub fn for_admin(option: Option<&str>) -> Self {
        match option.map(|o| o.trim().to_lowercase()).as_deref() {
            Some("quantity desc") => DonationSort::QuantityDesc,
            Some("quantity asc") => DonationSort::QuantityAsc,
            Some("received asc") => DonationSort::ReceivedAsc,
            _ => DonationSort::CreatedDesc,
        }
    }

    /// Sorts in place; ties keep submission order
    pub fn apply(&self, donations: &mut [Donation]) {
        donations.sort_by_key(|d| d.created_at);
        match self {
            DonationSort::Submitted => {}
            DonationSort::CreatedDesc => donations.sort_by_key(|d| Reverse(d.created_at)),
            DonationSort::QuantityDesc => donations.sort_by_key(|d| Reverse(d.quantity)),
            DonationSort::QuantityAsc => donations.sort_by_key(|d| d.quantity),
            DonationSort::ReceivedAsc => donations.sort_by_key(|d| d.received),
            DonationSort::ReceivedDesc => donations.sort_by_key(|d| Reverse(d.received)),
        }
    }
}
