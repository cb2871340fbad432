//! Donation submission, listing and archiving

mod service;

#[cfg(test)]
mod tests;

pub use service::{DonationService, NewDonation};
