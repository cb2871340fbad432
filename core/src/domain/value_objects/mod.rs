//! Value objects passed between services and listeners.

pub mod contact_message;
pub mod donation_details;
pub mod mail;

pub use contact_message::ContactMessage;
pub use donation_details::DonationDetails;
pub use mail::Mail;
