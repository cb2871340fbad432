//! Institutions receiving donations

mod service;


pub use service::InstitutionService;
