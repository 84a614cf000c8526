use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::{AuthRequest, AuthService, TokenResponse};
use crate::error::AppError;

/// Register a new account
///
/// Creates a user from the supplied credentials and returns a bearer token.
#[post("/signup")]
pub async fn signup(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthRequest>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let token = auth.signup(&credentials).await?;

    Ok(HttpResponse::Created().json(TokenResponse { token }))
}

/// Sign in to an existing account
///
/// Verifies the supplied credentials and returns a bearer token.
#[post("/signin")]
pub async fn signin(
    auth: web::Data<AuthService>,
    credentials: web::Json<AuthRequest>,
) -> Result<impl Responder, AppError> {
    credentials.validate()?;

    let token = auth.signin(&credentials).await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
