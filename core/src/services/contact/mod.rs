//! Contact form delivery to the application inbox

mod service;

#[cfg(test)]
mod tests;

pub use service::ContactService;
