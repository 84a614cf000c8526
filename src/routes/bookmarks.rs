use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::bookmarks::BookmarkService;
use crate::error::AppError;
use crate::models::{CreateBookmarkRequest, EditBookmarkRequest};

/// Retrieves all bookmarks owned by the authenticated user, in creation
/// order.
///
/// ## Responses:
/// - `200 OK`: JSON array of bookmarks.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list(
    user: AuthenticatedUser,
    bookmarks: web::Data<BookmarkService>,
) -> Result<impl Responder, AppError> {
    let all = bookmarks.list_all(user.id).await?;

    Ok(HttpResponse::Ok().json(all))
}

/// Retrieves a single bookmark by id.
///
/// ## Responses:
/// - `200 OK`: the bookmark, if it exists and the caller owns it.
/// - `404 Not Found`: no such bookmark for this caller. Another user's
///   bookmark is reported exactly the same way.
#[get("/{id}")]
pub async fn get_one(
    user: AuthenticatedUser,
    bookmarks: web::Data<BookmarkService>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let bookmark = bookmarks.get_one(user.id, id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(bookmark))
}

/// Creates a new bookmark owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: 1–200 characters (required).
/// - `link`: a syntactically valid URL (required).
/// - `description` (optional): at most 1000 characters.
///
/// ## Responses:
/// - `201 Created`: the stored bookmark, including id and timestamps.
/// - `400 Bad Request`: malformed body or failed validation.
#[post("")]
pub async fn create(
    user: AuthenticatedUser,
    bookmarks: web::Data<BookmarkService>,
    input: web::Json<CreateBookmarkRequest>,
) -> Result<impl Responder, AppError> {
    input.validate()?;

    let bookmark = bookmarks.create(user.id, &input).await?;

    Ok(HttpResponse::Created().json(bookmark))
}

/// Applies a partial update to an owned bookmark. Unset fields keep their
/// current values.
///
/// ## Responses:
/// - `200 OK`: the updated bookmark.
/// - `403 Forbidden`: the bookmark is missing or owned by someone else; the
///   two cases are not distinguished.
#[patch("/{id}")]
pub async fn edit(
    user: AuthenticatedUser,
    bookmarks: web::Data<BookmarkService>,
    id: web::Path<i32>,
    changes: web::Json<EditBookmarkRequest>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;

    let bookmark = bookmarks.edit(user.id, id.into_inner(), &changes).await?;

    Ok(HttpResponse::Ok().json(bookmark))
}

/// Permanently deletes an owned bookmark.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `403 Forbidden`: missing or not owned; repeating a delete reports this
///   again.
#[delete("/{id}")]
pub async fn delete_one(
    user: AuthenticatedUser,
    bookmarks: web::Data<BookmarkService>,
    id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    bookmarks.delete(user.id, id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
