//! The logged-in user's own account

use actix_web::{web, HttpResponse};

use crate::dto::account::{
    ChangePasswordRequest, ProfileRequest, UpdateEmailRequest, UserResponse,
};
use crate::dto::MessageResponse;
use crate::handlers::ApiResult;
use crate::middleware::CurrentUser;
use crate::state::AppState;

use super::validated;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/account")
            .route("", web::get().to(get_account))
            .route("", web::delete().to(delete_account))
            .route("/downgrade", web::post().to(downgrade_account))
            .route("/email", web::put().to(update_email))
            .route("/profile", web::put().to(update_profile))
            .route("/password", web::put().to(change_password)),
    );
}

/// GET /api/v1/account
pub async fn get_account(CurrentUser(user): CurrentUser) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// DELETE /api/v1/account
///
/// The last active administrator cannot delete itself.
pub async fn delete_account(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/v1/account/downgrade
///
/// Gives up the administrator role; the account continues as a regular user.
pub async fn downgrade_account(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let user = state.users.remove_admin_role(user.id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/v1/account/email
///
/// Existing tokens keep working; they are bound to the account, not the address.
pub async fn update_email(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<UpdateEmailRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let user = state.users.update_email(user.id, &body.email).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/v1/account/profile
pub async fn update_profile(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<ProfileRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    let user = state.users.update_profile(user.id, body.into()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /api/v1/account/password
pub async fn change_password(
    CurrentUser(user): CurrentUser,
    state: web::Data<AppState>,
    body: web::Json<ChangePasswordRequest>,
) -> ApiResult<HttpResponse> {
    let body = validated(body.into_inner(), &state)?;
    state.users.change_password(user.id, &body.password).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        state.messages.get("password.changed.message"),
    )))
}
