//!
//! In-memory repositories.
//!
//! Back the same traits as the Postgres implementations with a `Mutex`-guarded
//! map, so services and HTTP handlers can be exercised without a live
//! database. Used throughout the unit and integration tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Bookmark, CreateBookmarkRequest, EditBookmarkRequest, EditUserRequest, User};

use super::{BookmarkRepo, RepoError, UserRepo};

#[derive(Default)]
struct UserTable {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, RepoError> {
        let mut table = self.table.lock().expect("user table lock poisoned");
        if table.rows.values().any(|u| u.email == email) {
            return Err(RepoError::Conflict);
        }

        table.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: table.next_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        let table = self.table.lock().expect("user table lock poisoned");
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.lock().expect("user table lock poisoned");
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: i32, changes: &EditUserRequest) -> Result<User, RepoError> {
        let mut table = self.table.lock().expect("user table lock poisoned");
        if let Some(new_email) = &changes.email {
            if table
                .rows
                .values()
                .any(|u| u.id != id && &u.email == new_email)
            {
                return Err(RepoError::Conflict);
            }
        }

        let user = table.rows.get_mut(&id).ok_or(RepoError::Db(sqlx::Error::RowNotFound))?;
        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &changes.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            user.last_name = Some(last_name.clone());
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

#[derive(Default)]
struct BookmarkTable {
    next_id: i32,
    rows: BTreeMap<i32, Bookmark>,
}

#[derive(Default)]
pub struct InMemoryBookmarkRepo {
    table: Mutex<BookmarkTable>,
}

impl InMemoryBookmarkRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkRepo for InMemoryBookmarkRepo {
    async fn list_by_owner(&self, user_id: i32) -> Result<Vec<Bookmark>, RepoError> {
        let table = self.table.lock().expect("bookmark table lock poisoned");
        // BTreeMap iteration yields ascending ids, i.e. creation order
        Ok(table
            .rows
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Bookmark>, RepoError> {
        let table = self.table.lock().expect("bookmark table lock poisoned");
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        user_id: i32,
        input: &CreateBookmarkRequest,
    ) -> Result<Bookmark, RepoError> {
        let mut table = self.table.lock().expect("bookmark table lock poisoned");
        table.next_id += 1;
        let now = Utc::now();
        let bookmark = Bookmark {
            id: table.next_id,
            user_id,
            title: input.title.clone(),
            description: input.description.clone(),
            link: input.link.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(bookmark.id, bookmark.clone());
        Ok(bookmark)
    }

    async fn update(&self, id: i32, changes: &EditBookmarkRequest) -> Result<Bookmark, RepoError> {
        let mut table = self.table.lock().expect("bookmark table lock poisoned");
        let bookmark = table
            .rows
            .get_mut(&id)
            .ok_or(RepoError::Db(sqlx::Error::RowNotFound))?;
        if let Some(title) = &changes.title {
            bookmark.title = title.clone();
        }
        if let Some(description) = &changes.description {
            bookmark.description = Some(description.clone());
        }
        if let Some(link) = &changes.link {
            bookmark.link = link.clone();
        }
        bookmark.updated_at = Utc::now();
        Ok(bookmark.clone())
    }

    async fn delete(&self, id: i32) -> Result<u64, RepoError> {
        let mut table = self.table.lock().expect("bookmark table lock poisoned");
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark_input(title: &str) -> CreateBookmarkRequest {
        CreateBookmarkRequest {
            title: title.to_string(),
            description: None,
            link: "https://example.com".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepo::new();

        let user = repo.insert("a@example.com", "hash").await.unwrap();
        assert_eq!(user.id, 1);

        match repo.insert("a@example.com", "other-hash").await {
            Err(RepoError::Conflict) => {}
            other => panic!("expected conflict, got {:?}", other.map(|u| u.id)),
        }

        // A different email still goes through
        let second = repo.insert("b@example.com", "hash").await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[actix_rt::test]
    async fn test_user_partial_update() {
        let repo = InMemoryUserRepo::new();
        let user = repo.insert("a@example.com", "hash").await.unwrap();

        let updated = repo
            .update(
                user.id,
                &EditUserRequest {
                    email: None,
                    first_name: Some("Ada".to_string()),
                    last_name: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert!(updated.last_name.is_none());
    }

    #[actix_rt::test]
    async fn test_bookmark_crud_and_ordering() {
        let repo = InMemoryBookmarkRepo::new();

        let first = repo.insert(1, &bookmark_input("first")).await.unwrap();
        let second = repo.insert(1, &bookmark_input("second")).await.unwrap();
        repo.insert(2, &bookmark_input("other user")).await.unwrap();

        let mine = repo.list_by_owner(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, first.id);
        assert_eq!(mine[1].id, second.id);

        assert_eq!(repo.delete(first.id).await.unwrap(), 1);
        assert_eq!(repo.delete(first.id).await.unwrap(), 0);
        assert!(repo.find_by_id(first.id).await.unwrap().is_none());
    }
}
