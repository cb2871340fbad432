//! Donation together with the entities it references.

use serde::Serialize;

use crate::domain::entities::{Category, Donation, Institution};

/// A donation resolved for display and for the thank-you mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationDetails {
    pub donation: Donation,
    pub institution: Option<Institution>,
    pub categories: Vec<Category>,
}

impl DonationDetails {
    /// Category names joined with `", "`
    pub fn category_names(&self) -> String {
        self.categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
