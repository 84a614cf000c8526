pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod users;

use actix_web::web;

use crate::auth::AuthGuard;

/// Builds the full route tree.
///
/// The auth scope stays public; the user and bookmark scopes are wrapped with
/// the guard, so every request to them is authenticated before a handler
/// runs. `main.rs` and the integration tests share this wiring.
pub fn config(guard: AuthGuard) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(health::health)
            .service(
                web::scope("/auth")
                    .service(auth::signup)
                    .service(auth::signin),
            )
            .service(
                web::scope("/users")
                    .wrap(guard.clone())
                    .service(users::me)
                    .service(users::edit),
            )
            .service(
                web::scope("/bookmarks")
                    .wrap(guard)
                    .service(bookmarks::list)
                    .service(bookmarks::create)
                    .service(bookmarks::get_one)
                    .service(bookmarks::edit)
                    .service(bookmarks::delete_one),
            );
    }
}
