use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a bookmark entity as stored in the database and returned by the
/// API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Bookmark {
    /// Unique identifier, assigned by the store.
    pub id: i32,
    /// Identifier of the owning user.
    pub user_id: i32,
    /// The title of the bookmark.
    pub title: String,
    /// An optional free-form description.
    pub description: Option<String>,
    /// The bookmarked URL.
    pub link: String,
    /// Timestamp of when the bookmark was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the bookmark.
    pub updated_at: DateTime<Utc>,
}

/// Input structure for creating a bookmark.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBookmarkRequest {
    /// The title of the bookmark. Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The URL to bookmark. Must be a syntactically valid URL.
    #[validate(url)]
    pub link: String,
}

/// Input structure for a partial bookmark update. Unset fields are left
/// unchanged.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EditBookmarkRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url)]
    pub link: Option<String>,
}
