//!
//! PostgreSQL-backed repositories.
//!
//! All queries are single parameterized statements; concurrency control is
//! delegated to the store. Partial updates use COALESCE so unset fields keep
//! their current value.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Bookmark, CreateBookmarkRequest, EditBookmarkRequest, EditUserRequest, User};

use super::{BookmarkRepo, RepoError, UserRepo};

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash, created_at, updated_at) \
             VALUES ($1, $2, now(), now()) \
             RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, first_name, last_name, created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, first_name, last_name, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i32, changes: &EditUserRequest) -> Result<User, RepoError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users \
             SET email = COALESCE($1, email), \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 updated_at = now() \
             WHERE id = $4 \
             RETURNING id, email, password_hash, first_name, last_name, created_at, updated_at",
        )
        .bind(&changes.email)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

pub struct PgBookmarkRepo {
    pool: PgPool,
}

impl PgBookmarkRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepo for PgBookmarkRepo {
    async fn list_by_owner(&self, user_id: i32) -> Result<Vec<Bookmark>, RepoError> {
        let bookmarks = sqlx::query_as::<_, Bookmark>(
            "SELECT id, user_id, title, description, link, created_at, updated_at \
             FROM bookmarks WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookmarks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Bookmark>, RepoError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "SELECT id, user_id, title, description, link, created_at, updated_at \
             FROM bookmarks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bookmark)
    }

    async fn insert(
        &self,
        user_id: i32,
        input: &CreateBookmarkRequest,
    ) -> Result<Bookmark, RepoError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "INSERT INTO bookmarks (user_id, title, description, link, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) \
             RETURNING id, user_id, title, description, link, created_at, updated_at",
        )
        .bind(user_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.link)
        .fetch_one(&self.pool)
        .await?;

        Ok(bookmark)
    }

    async fn update(&self, id: i32, changes: &EditBookmarkRequest) -> Result<Bookmark, RepoError> {
        let bookmark = sqlx::query_as::<_, Bookmark>(
            "UPDATE bookmarks \
             SET title = COALESCE($1, title), \
                 description = COALESCE($2, description), \
                 link = COALESCE($3, link), \
                 updated_at = now() \
             WHERE id = $4 \
             RETURNING id, user_id, title, description, link, created_at, updated_at",
        )
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(&changes.link)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(bookmark)
    }

    async fn delete(&self, id: i32) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
