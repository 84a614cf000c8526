use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use linkforge::auth::{AuthGuard, AuthService, PasswordHasher, TokenIssuer};
use linkforge::bookmarks::BookmarkService;
use linkforge::config::Config;
use linkforge::repo::{BookmarkRepo, PgBookmarkRepo, PgUserRepo, UserRepo};
use linkforge::routes;
use linkforge::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let users: Arc<dyn UserRepo> = Arc::new(PgUserRepo::new(pool.clone()));
    let bookmarks: Arc<dyn BookmarkRepo> = Arc::new(PgBookmarkRepo::new(pool));

    let tokens = TokenIssuer::new(&config.jwt_secret);
    let auth_service = AuthService::new(users.clone(), PasswordHasher::new(), tokens.clone());
    let user_service = UserService::new(users.clone());
    let bookmark_service = BookmarkService::new(bookmarks);
    let guard = AuthGuard::new(tokens, users);

    log::info!("Starting linkforge server at {}", config.server_url());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(bookmark_service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config(guard.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
