//!
//! # User Service
//!
//! Profile operations for the authenticated caller. Responses use
//! [`UserResponse`], which carries no hash field.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{EditUserRequest, UserResponse};
use crate::repo::{RepoError, UserRepo};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepo>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepo>) -> Self {
        Self { users }
    }

    /// The caller's own record.
    pub async fn me(&self, user_id: i32) -> Result<UserResponse, AppError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        Ok(user.into())
    }

    /// Partial profile update; unset fields are left unchanged. Changing the
    /// email to one that is already registered fails like a duplicate signup.
    pub async fn edit(
        &self,
        user_id: i32,
        changes: &EditUserRequest,
    ) -> Result<UserResponse, AppError> {
        match self.users.update(user_id, changes).await {
            Ok(user) => Ok(user.into()),
            Err(RepoError::Conflict) => Err(AppError::CredentialsTaken),
            Err(e) => Err(e.into()),
        }
    }
}
