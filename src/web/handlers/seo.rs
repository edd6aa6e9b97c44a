use crate::seo::{sitemap, RobotsPolicy};
use crate::services::blog;
use crate::web::error::AppResult;
use crate::web::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

pub async fn robots_txt(State(state): State<Arc<AppState>>) -> Response {
    let policy = RobotsPolicy::from_config(&state.config.site, &state.config.robots);
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        policy.render(),
    )
        .into_response()
}

pub async fn sitemap(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let posts = blog::list_all(&state.db)?;
    let xml = sitemap::generate(&state.config.site, state.default_locale, &posts);

    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    )
        .into_response())
}
