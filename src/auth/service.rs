use std::sync::Arc;

use crate::auth::password::PasswordHasher;
use crate::auth::token::TokenIssuer;
use crate::auth::AuthRequest;
use crate::error::AppError;
use crate::repo::{RepoError, UserRepo};

/// Orchestrates signup and signin against the user store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepo>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepo>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Registers a new account and returns a bearer token for it.
    ///
    /// The insert itself is the uniqueness check: a conflicting email surfaces
    /// as `CredentialsTaken`, any other store failure propagates.
    pub async fn signup(&self, credentials: &AuthRequest) -> Result<String, AppError> {
        let password_hash = self.hasher.hash(&credentials.password)?;

        let user = match self.users.insert(&credentials.email, &password_hash).await {
            Ok(user) => user,
            Err(RepoError::Conflict) => return Err(AppError::CredentialsTaken),
            Err(e) => return Err(e.into()),
        };

        self.tokens.issue(user.id, &user.email)
    }

    /// Authenticates an existing account and returns a bearer token.
    ///
    /// Unknown email and wrong password fail with the same error kind so the
    /// response cannot be used to probe which emails are registered.
    pub async fn signin(&self, credentials: &AuthRequest) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(&credentials.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        self.tokens.issue(user.id, &user.email)
    }
}
