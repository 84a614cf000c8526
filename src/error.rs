//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions that can occur, from database issues to
//! authentication failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with JSON bodies of the shape
//! `{"message": ...}`. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error` and the argon2
//! hash error allow conversion with the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::repo::RepoError;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, or expired bearer token (HTTP 401).
    Unauthorized(String),
    /// Malformed or invalid request input (HTTP 400).
    BadRequest(String),
    /// Failed input validation (HTTP 400).
    Validation(String),
    /// Requested resource does not exist, or is not visible to the caller
    /// (HTTP 404).
    NotFound(String),
    /// Signup attempted with an email that is already registered (HTTP 403).
    CredentialsTaken,
    /// Signin failed. Unknown email and wrong password share this variant so
    /// the response cannot be used to enumerate accounts (HTTP 403).
    InvalidCredentials,
    /// The caller does not own the record they tried to modify, or it does not
    /// exist; the two cases are indistinguishable (HTTP 403).
    AccessDenied,
    /// Error originating from the data store (HTTP 500).
    Database(String),
    /// Unexpected server-side error (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::CredentialsTaken => write!(f, "Credentials taken"),
            AppError::InvalidCredentials => write!(f, "Credentials incorrect!"),
            AppError::AccessDenied => write!(f, "Access to resources denied!"),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// Store and internal errors are logged server-side and presented to the client
/// as a generic message: response bodies never carry internal identifiers or
/// store-specific error codes.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "message": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "message": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "message": msg
            })),
            AppError::CredentialsTaken => HttpResponse::Forbidden().json(json!({
                "message": "Credentials taken"
            })),
            AppError::InvalidCredentials => HttpResponse::Forbidden().json(json!({
                "message": "Credentials incorrect!"
            })),
            AppError::AccessDenied => HttpResponse::Forbidden().json(json!({
                "message": "Access to resources denied!"
            })),
            AppError::Database(msg) | AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `AppError::NotFound`; everything else is a store
/// failure and propagates as `AppError::Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts `RepoError` into `AppError`.
///
/// A conflict that reaches this generic conversion was not handled by the
/// calling service (signup maps it to `CredentialsTaken` explicitly), so it is
/// treated as a store failure.
impl From<RepoError> for AppError {
    fn from(error: RepoError) -> AppError {
        match error {
            RepoError::Conflict => AppError::Database("unique constraint violation".into()),
            RepoError::Db(e) => e.into(),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Converts argon2 hash errors into `AppError::Internal`.
///
/// This handles errors during password hashing or when a stored hash cannot be
/// parsed; the detail stays out of the response body.
impl From<argon2::password_hash::Error> for AppError {
    fn from(error: argon2::password_hash::Error) -> AppError {
        AppError::Internal(error.to_string())
    }
}
