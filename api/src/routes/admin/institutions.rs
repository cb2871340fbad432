use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::catalog::InstitutionRequest;
use crate::handlers::ApiResult;
use crate::middleware::AdminUser;
use crate::routes::validated;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/institutions")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

pub async fn list(_admin: AdminUser, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.institutions.find_all().await?))
}

pub async fn get(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.institutions.find_by_id(path.into_inner()).await?))
}

pub async fn create(
    _admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Json<InstitutionRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let institution = state
        .institutions
        .create(body.name.trim(), body.description.trim())
        .await?;
    Ok(HttpResponse::Created().json(institution))
}

pub async fn update(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<InstitutionRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let institution = state
        .institutions
        .update(path.into_inner(), body.name.trim(), body.description.trim())
        .await?;
    Ok(HttpResponse::Ok().json(institution))
}

/// DELETE /api/v1/admin/institutions/{id}
///
/// Donations addressed to the institution are kept without one.
pub async fn delete(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.institutions.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
