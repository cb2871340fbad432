//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `gh_core`:
//!
//! - **Database**: MySQL repositories using SQLx, plus schema migrations
//! - **Mail**: SMTP delivery through lettre and a logging console sender
//! - **Password**: bcrypt password encoder
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Mail delivery module
pub mod mail;

/// Password hashing
pub mod password;

mod error;

pub use error::InfrastructureError;
pub use mail::{create_mail_sender, ConsoleMailSender, SmtpMailSender};
pub use password::BcryptPasswordEncoder;

#[cfg(feature = "mysql")]
pub use database::DatabasePool;
