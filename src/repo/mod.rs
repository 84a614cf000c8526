//!
//! # Repositories
//!
//! One repository trait per entity, so the store stays swappable: the
//! application is wired against `Arc<dyn UserRepo>` / `Arc<dyn BookmarkRepo>`
//! and runs identically on the Postgres backend or the in-memory backend used
//! by the tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{Bookmark, CreateBookmarkRequest, EditBookmarkRequest, EditUserRequest, User};

pub use memory::{InMemoryBookmarkRepo, InMemoryUserRepo};
pub use postgres::{PgBookmarkRepo, PgUserRepo};

/// Error type returned by repository operations.
///
/// Unique-constraint violations get their own variant so callers can
/// distinguish a conflicting insert (duplicate email) from a store failure.
#[derive(Debug)]
pub enum RepoError {
    /// A unique constraint was violated by an insert or update.
    Conflict,
    /// Any other error from the underlying store.
    Db(sqlx::Error),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RepoError::Conflict => write!(f, "unique constraint violation"),
            RepoError::Db(e) => write!(f, "database error: {}", e),
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(error: sqlx::Error) -> RepoError {
        if let sqlx::Error::Database(db_err) = &error {
            if db_err.is_unique_violation() {
                return RepoError::Conflict;
            }
        }
        RepoError::Db(error)
    }
}

/// Persistence port for user records.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a new user. Fails with `RepoError::Conflict` if the email is
    /// already registered.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Applies a partial profile update; unset fields are left unchanged.
    async fn update(&self, id: i32, changes: &EditUserRequest) -> Result<User, RepoError>;
}

/// Persistence port for bookmark records.
#[async_trait]
pub trait BookmarkRepo: Send + Sync {
    /// All bookmarks owned by `user_id`, in creation order.
    async fn list_by_owner(&self, user_id: i32) -> Result<Vec<Bookmark>, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Bookmark>, RepoError>;

    async fn insert(
        &self,
        user_id: i32,
        input: &CreateBookmarkRequest,
    ) -> Result<Bookmark, RepoError>;

    /// Applies a partial update; unset fields are left unchanged.
    async fn update(&self, id: i32, changes: &EditBookmarkRequest) -> Result<Bookmark, RepoError>;

    /// Removes a bookmark, returning the number of rows affected.
    async fn delete(&self, id: i32) -> Result<u64, RepoError>;
}
