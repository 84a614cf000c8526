pub mod bookmark;
pub mod user;

pub use bookmark::{Bookmark, CreateBookmarkRequest, EditBookmarkRequest};
pub use user::{EditUserRequest, User, UserResponse};
