//! HTTP routes under `/api/v1`

pub mod account;
pub mod admin;
pub mod auth;
pub mod donations;
pub mod password;
pub mod public;
pub mod registration;

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::handlers::{validation_error, ApiResult};
use crate::state::AppState;

/// Register every route of the API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1")
            .configure(registration::configure)
            .configure(password::configure)
            .configure(auth::configure)
            .configure(public::configure)
            .configure(account::configure)
            .configure(donations::configure)
            .service(web::scope("/admin").configure(admin::configure)),
    );
}

/// Reject a request body that breaks its field rules
pub(crate) fn validated<T: Validate>(body: T, state: &AppState) -> ApiResult<T> {
    body.validate()
        .map_err(|errors| validation_error(errors, &state.messages))?;
    Ok(body)
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "good-hands-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
