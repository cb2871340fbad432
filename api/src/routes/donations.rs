//! Donations of the logged-in user

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::donation::DonationRequest;
use crate::dto::SortQuery;
use crate::handlers::ApiResult;
use crate::middleware::CurrentUser;
use crate::state::AppState;

use super::validated;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/donations")
            .route("", web::get().to(list_donations))
            .route("", web::post().to(create_donation))
            .route("/{id}", web::get().to(get_donation))
            .route("/{id}/archive", web::post().to(archive_donation)),
    );
}

/// GET /api/v1/donations?sort=...
///
/// Sort options: `created`, `quantity desc`, `quantity asc`, `received asc`;
/// without an option donations keep submission order.
pub async fn list_donations(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    query: web::Query<SortQuery>,
) -> ApiResult<HttpResponse> {
    let donations = state
        .donations
        .find_user_donations(user.id, query.sort.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(donations))
}

/// POST /api/v1/donations
///
/// Stores the donation and sends the thank-you mail.
///
/// ## Errors
/// - 400 Bad Request: invalid form
/// - 404 Not Found: unknown category or institution
/// - 503 Service Unavailable: donation stored but the mail could not be sent
pub async fn create_donation(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<DonationRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let details = state.donations.create(&user, body.into()).await?;
    Ok(HttpResponse::Created().json(details))
}

/// GET /api/v1/donations/{id}
pub async fn get_donation(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let details = state
        .donations
        .find_user_donation(user.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(details))
}

/// POST /api/v1/donations/{id}/archive
///
/// Marks the donation as received.
pub async fn archive_donation(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let donation = state
        .donations
        .archive_user_donation(user.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(donation))
}
