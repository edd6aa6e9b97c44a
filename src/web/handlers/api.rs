use crate::i18n::{Dictionaries, Locale};
use crate::services::uploads;
use crate::web::extractors::CurrentUser;
use crate::web::state::AppState;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DictionaryQuery {
    locale: Option<String>,
}

/// `GET /api/dictionary?locale=xx`. Unknown or missing locales get the
/// default dictionary; there is no error path.
pub async fn dictionary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DictionaryQuery>,
    headers: HeaderMap,
) -> Response {
    let locale = Locale::resolve(query.locale.as_deref(), state.default_locale);
    let dict = Dictionaries::get().dictionary(locale);
    let etag = format!("\"{}\"", dict.version());

    let cache_headers = [
        (header::ETAG, etag.clone()),
        (header::CONTENT_LANGUAGE, locale.code().to_string()),
        (header::CACHE_CONTROL, "public, max-age=300".to_string()),
        (header::VARY, "Accept-Encoding".to_string()),
    ];

    let not_modified = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|tag| tag.trim() == etag || tag.trim() == "*"));

    if not_modified {
        return (StatusCode::NOT_MODIFIED, cache_headers).into_response();
    }

    (cache_headers, Json(dict.messages().clone())).into_response()
}

pub async fn account_uploads(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Response {
    Json(uploads::list_for_user(&state.db, user.id)).into_response()
}

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let db_healthy = state.db.ping();
    let status = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let mut response = (
        status,
        Json(serde_json::json!({
            "status": if db_healthy { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "db_healthy": db_healthy,
        })),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
