use actix_web::{get, patch, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::EditUserRequest;
use crate::users::UserService;

/// Returns the authenticated caller's own record.
///
/// The response is shaped by `UserResponse`, so the stored password hash is
/// never part of it.
#[get("/me")]
pub async fn me(
    user: AuthenticatedUser,
    users: web::Data<UserService>,
) -> Result<impl Responder, AppError> {
    let profile = users.me(user.id).await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Applies a partial update to the caller's profile.
#[patch("")]
pub async fn edit(
    user: AuthenticatedUser,
    users: web::Data<UserService>,
    changes: web::Json<EditUserRequest>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;

    let profile = users.edit(user.id, &changes).await?;

    Ok(HttpResponse::Ok().json(profile))
}
