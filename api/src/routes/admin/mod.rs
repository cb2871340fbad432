//! Administrator resources under `/api/v1/admin`.
//!
//! Every handler takes an [`AdminUser`](crate::middleware::AdminUser).

pub mod categories;
pub mod donations;
pub mod institutions;
pub mod users;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure)
        .configure(categories::configure)
        .configure(institutions::configure)
        .configure(donations::configure);
}
