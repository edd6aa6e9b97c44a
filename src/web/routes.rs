use super::handlers;
use super::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/blog", get(handlers::pages::blog_index))
        .route("/blog/:slug", get(handlers::pages::blog_post))
        .route("/press", get(handlers::pages::press))
        .route(
            "/contact",
            get(handlers::pages::contact_form).post(handlers::pages::contact_submit),
        )
        .route("/notifications", get(handlers::pages::notifications_page))
        .route(
            "/notifications/read",
            post(handlers::pages::notifications_mark_read),
        )
}

pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/sign-in",
            get(handlers::account::sign_in_form).post(handlers::account::sign_in),
        )
        .route(
            "/sign-out",
            get(handlers::account::sign_out_form).post(handlers::account::sign_out),
        )
        .route("/locale/:code", get(handlers::account::set_locale))
}

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dictionary", get(handlers::api::dictionary))
        .route("/api/account/uploads", get(handlers::api::account_uploads))
        .route("/health", get(handlers::api::health))
}

pub fn seo_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/robots.txt", get(handlers::seo::robots_txt))
        .route("/sitemap.xml", get(handlers::seo::sitemap))
}
