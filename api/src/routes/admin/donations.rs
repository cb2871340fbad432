use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::SortQuery;
use crate::handlers::ApiResult;
use crate::middleware::AdminUser;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/donations")
            .route("", web::get().to(list))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::delete().to(delete))
            .route("/{id}/archive", web::post().to(archive))
            .route("/{id}/unarchive", web::post().to(unarchive)),
    );
}

/// GET /api/v1/admin/donations?sort=...
///
/// Newest first unless `quantity desc`, `quantity asc` or `received asc` is given.
pub async fn list(
    _admin: AdminUser,
    state: web::Data<AppState>,
    query: web::Query<SortQuery>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.donations.find_all(query.sort.as_deref()).await?))
}

pub async fn get(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.donations.find_details(path.into_inner()).await?))
}

pub async fn archive(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.donations.archive(path.into_inner()).await?))
}

pub async fn unarchive(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.donations.unarchive(path.into_inner()).await?))
}

pub async fn delete(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.donations.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
