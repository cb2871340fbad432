//! Landing page data and the contact form

use actix_web::{web, HttpResponse};

use crate::dto::contact::ContactRequest;
use crate::dto::donation::StatsResponse;
use crate::dto::MessageResponse;
use crate::handlers::ApiResult;
use crate::middleware::OptionalUser;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(stats))
        .route("/institutions", web::get().to(list_institutions))
        .route("/categories", web::get().to(list_categories))
        .route("/contact", web::post().to(contact));
}

/// GET /api/v1/stats
pub async fn stats(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(StatsResponse {
        donations: state.donations.count().await?,
        bags: state.donations.bags().await?,
    }))
}

/// GET /api/v1/institutions
pub async fn list_institutions(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.institutions.find_all().await?))
}

/// GET /api/v1/categories
pub async fn list_categories(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.categories.find_all().await?))
}

/// POST /api/v1/contact
///
/// Logged-in senders reply from their account e-mail.
pub async fn contact(
    state: web::Data<AppState>,
    sender: OptionalUser,
    body: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let account_email = sender.0.map(|user| user.email);
    state
        .contact
        .send(body.into_inner().into_message(account_email))
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.get("contact.sent.message"),
    )))
}
