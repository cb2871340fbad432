//! Donation categories

mod service;

#[cfg(test)]
mod tests;

pub use service::CategoryService;
