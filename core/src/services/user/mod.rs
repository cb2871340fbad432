//! Account lifecycle: verification, password changes, administration

mod service;

#[cfg(test)]
mod tests;

pub use service::UserService;
