//!
//! # Bookmark Service
//!
//! Ownership-scoped CRUD over bookmark records. Every operation takes the
//! authenticated caller's id and acts only on records that caller owns: a
//! bookmark that does not exist and a bookmark owned by someone else produce
//! the same outcome, so callers cannot probe for other users' records.

use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Bookmark, CreateBookmarkRequest, EditBookmarkRequest};
use crate::repo::BookmarkRepo;

#[derive(Clone)]
pub struct BookmarkService {
    bookmarks: Arc<dyn BookmarkRepo>,
}

impl BookmarkService {
    pub fn new(bookmarks: Arc<dyn BookmarkRepo>) -> Self {
        Self { bookmarks }
    }

    /// All bookmarks owned by the caller, in creation order.
    pub async fn list_all(&self, user_id: i32) -> Result<Vec<Bookmark>, AppError> {
        Ok(self.bookmarks.list_by_owner(user_id).await?)
    }

    /// A single bookmark, only if it exists and the caller owns it.
    pub async fn get_one(&self, user_id: i32, id: i32) -> Result<Bookmark, AppError> {
        match self.bookmarks.find_by_id(id).await? {
            Some(bookmark) if bookmark.user_id == user_id => Ok(bookmark),
            _ => Err(AppError::NotFound("Bookmark not found".into())),
        }
    }

    /// Persists a new bookmark owned by the caller.
    pub async fn create(
        &self,
        user_id: i32,
        input: &CreateBookmarkRequest,
    ) -> Result<Bookmark, AppError> {
        Ok(self.bookmarks.insert(user_id, input).await?)
    }

    /// Merges the provided fields into an owned bookmark; unset fields are
    /// left unchanged.
    pub async fn edit(
        &self,
        user_id: i32,
        id: i32,
        changes: &EditBookmarkRequest,
    ) -> Result<Bookmark, AppError> {
        match self.bookmarks.find_by_id(id).await? {
            Some(bookmark) if bookmark.user_id == user_id => {
                Ok(self.bookmarks.update(id, changes).await?)
            }
            _ => Err(AppError::AccessDenied),
        }
    }

    /// Permanently removes an owned bookmark.
    ///
    /// Deleting an id that is already gone reports the same denial as deleting
    /// someone else's bookmark.
    pub async fn delete(&self, user_id: i32, id: i32) -> Result<(), AppError> {
        match self.bookmarks.find_by_id(id).await? {
            Some(bookmark) if bookmark.user_id == user_id => {
                if self.bookmarks.delete(id).await? == 0 {
                    return Err(AppError::AccessDenied);
                }
                Ok(())
            }
            _ => Err(AppError::AccessDenied),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::InMemoryBookmarkRepo;

    fn service() -> BookmarkService {
        BookmarkService::new(Arc::new(InMemoryBookmarkRepo::new()))
    }

    fn create_input(title: &str) -> CreateBookmarkRequest {
        CreateBookmarkRequest {
            title: title.to_string(),
            description: Some("a description".to_string()),
            link: "https://example.com".to_string(),
        }
    }

    const OWNER: i32 = 1;
    const INTRUDER: i32 = 2;

    #[actix_rt::test]
    async fn test_create_then_get_round_trip() {
        let service = service();

        let created = service.create(OWNER, &create_input("mine")).await.unwrap();
        let fetched = service.get_one(OWNER, created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[actix_rt::test]
    async fn test_other_users_records_stay_hidden() {
        let service = service();
        let created = service.create(OWNER, &create_input("mine")).await.unwrap();

        assert!(matches!(
            service.get_one(INTRUDER, created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service
                .edit(
                    INTRUDER,
                    created.id,
                    &EditBookmarkRequest {
                        title: Some("stolen".to_string()),
                        description: None,
                        link: None,
                    }
                )
                .await,
            Err(AppError::AccessDenied)
        ));
        assert!(matches!(
            service.delete(INTRUDER, created.id).await,
            Err(AppError::AccessDenied)
        ));

        // The record is untouched for its owner
        let mine = service.get_one(OWNER, created.id).await.unwrap();
        assert_eq!(mine.title, "mine");
    }

    #[actix_rt::test]
    async fn test_partial_edit_keeps_unset_fields() {
        let service = service();
        let created = service.create(OWNER, &create_input("before")).await.unwrap();

        let updated = service
            .edit(
                OWNER,
                created.id,
                &EditBookmarkRequest {
                    title: Some("after".to_string()),
                    description: None,
                    link: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.link, created.link);
    }

    #[actix_rt::test]
    async fn test_repeated_delete_is_denied() {
        let service = service();
        let created = service.create(OWNER, &create_input("ephemeral")).await.unwrap();

        service.delete(OWNER, created.id).await.unwrap();

        assert!(matches!(
            service.delete(OWNER, created.id).await,
            Err(AppError::AccessDenied)
        ));
        assert!(service.list_all(OWNER).await.unwrap().is_empty());
    }
}
