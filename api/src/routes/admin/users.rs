//! Account administration

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::dto::account::{
    ChangePasswordRequest, ProfileRequest, UpdateEmailRequest, UserResponse,
};
use crate::dto::MessageResponse;
use crate::handlers::ApiResult;
use crate::middleware::AdminUser;
use crate::routes::validated;
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/admins", web::get().to(list_admins)).service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::delete().to(delete_user))
            .route("/{id}/email", web::put().to(update_email))
            .route("/{id}/profile", web::put().to(update_profile))
            .route("/{id}/password", web::put().to(change_password))
            .route("/{id}/block", web::post().to(block))
            .route("/{id}/unblock", web::post().to(unblock))
            .route("/{id}/grant-admin", web::post().to(grant_admin))
            .route("/{id}/revoke-admin", web::post().to(revoke_admin)),
    );
}

fn users_response(users: Vec<gh_core::User>) -> HttpResponse {
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    HttpResponse::Ok().json(users)
}

/// GET /api/v1/admin/admins
///
/// Administrators other than the caller.
pub async fn list_admins(
    AdminUser(admin): AdminUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    Ok(users_response(state.users.find_all_admins(admin.id).await?))
}

/// GET /api/v1/admin/users
///
/// Regular users other than the caller.
pub async fn list_users(
    AdminUser(admin): AdminUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    Ok(users_response(state.users.find_all_users(admin.id).await?))
}

pub async fn get_user(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn update_email(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateEmailRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let user = state.users.update_email(path.into_inner(), &body.email).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn update_profile(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let user = state
        .users
        .update_profile(path.into_inner(), body.into())
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn change_password(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    state
        .users
        .change_password(path.into_inner(), &body.password)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.get("password.changed.message"),
    )))
}

pub async fn block(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.block(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn unblock(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.unblock(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

pub async fn grant_admin(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.add_admin_role(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// POST /api/v1/admin/users/{id}/revoke-admin
///
/// ## Errors
/// - 409 Conflict: not an administrator, or the last active administrator
pub async fn revoke_admin(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.remove_admin_role(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Donations of the account are kept without an owner.
///
/// ## Errors
/// - 409 Conflict: the last active administrator
pub async fn delete_user(
    _admin: AdminUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
