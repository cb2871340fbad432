//! # Good Hands API
//!
//! HTTP layer of the Good Hands backend: routes, request validation, bearer
//! token authentication and the mapping of domain errors to JSON responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::{AppState, Repositories};
