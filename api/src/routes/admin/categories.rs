use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::catalog::CategoryRequest;
use crate::handlers::ApiResult;
use crate::middleware::AdminUser;
use crate::routes::validated;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(list))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get))
            .route("/{id}", web::put().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

pub async fn list(_admin: AdminUser, state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.categories.find_all().await?))
}

pub async fn get(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.categories.find_by_id(path.into_inner()).await?))
}

pub async fn create(
    _admin: AdminUser,
    state: web::Data<AppState>,
    body: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    Ok(HttpResponse::Created().json(state.categories.create(body.name.trim()).await?))
}

pub async fn update(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let category = state
        .categories
        .update(path.into_inner(), body.name.trim())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/v1/admin/categories/{id}
///
/// ## Errors
/// - 409 Conflict: the category is the only category of some donation
pub async fn delete(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.categories.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
