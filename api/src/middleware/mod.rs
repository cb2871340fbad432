pub mod auth;
pub mod cors;

pub use auth::{AdminUser, Claims, CurrentUser, JwtService, OptionalUser};
pub use cors::create_cors;
