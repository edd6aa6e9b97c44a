use crate::i18n::{Dictionaries, Locale};
use crate::seo::Page;
use crate::services::auth;
use crate::web::error::AppResult;
use crate::web::extractors::{OptionalUser, RequestLocale, LOCALE_COOKIE, SESSION_COOKIE};
use crate::web::handlers::pages::{make_context, render_page};
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use time::Duration;

const LOCALE_COOKIE_DAYS: i64 = 365;

pub async fn sign_in_form(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to(Page::Home.path()).into_response());
    }

    let meta = state.metadata(locale).build_page(Page::SignIn);
    let ctx = make_context(&state, &user, locale, Page::SignIn.path(), &meta);
    render_page(&state, "pages/sign_in.html", &ctx, locale, StatusCode::OK)
}

#[derive(Deserialize)]
pub struct SignInForm {
    username: String,
    password: String,
}

pub async fn sign_in(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> AppResult<Response> {
    let limiter_key = form.username.trim().to_lowercase();

    if !state.rate_limiter.check(&limiter_key) {
        tracing::warn!(username = %limiter_key, "Sign-in rate limited");
        return sign_in_error(&state, locale, "sign_in.rate_limited", StatusCode::TOO_MANY_REQUESTS);
    }

    match auth::authenticate(&state.db, form.username.trim(), &form.password)? {
        Some(user) => {
            state.rate_limiter.clear(&limiter_key);
            let days = state.config.auth.session_lifetime_days;
            let token = auth::create_session(&state.db, user.id, days)?;
            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.auth.secure_cookies)
                .max_age(Duration::days(days))
                .build();

            tracing::info!(user_id = user.id, "User signed in");
            Ok((jar.add(cookie), Redirect::to(Page::Home.path())).into_response())
        }
        None => {
            state.rate_limiter.record_failure(&limiter_key);
            sign_in_error(&state, locale, "sign_in.invalid", StatusCode::UNAUTHORIZED)
        }
    }
}

fn sign_in_error(
    state: &AppState,
    locale: Locale,
    message_key: &str,
    status: StatusCode,
) -> AppResult<Response> {
    let meta = state.metadata(locale).build_page(Page::SignIn);
    let mut ctx = make_context(state, &None, locale, Page::SignIn.path(), &meta);
    ctx.insert(
        "error",
        &Dictionaries::get().translate(locale, state.default_locale, message_key),
    );
    render_page(state, "pages/sign_in.html", &ctx, locale, status)
}

pub async fn sign_out_form(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    if user.is_none() {
        return Ok(Redirect::to(Page::Home.path()).into_response());
    }

    let meta = state.metadata(locale).build_page(Page::SignOut);
    let ctx = make_context(&state, &user, locale, Page::SignOut.path(), &meta);
    render_page(&state, "pages/sign_out.html", &ctx, locale, StatusCode::OK)
}

pub async fn sign_out(State(state): State<Arc<AppState>>, jar: CookieJar) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = auth::delete_session(&state.db, cookie.value()) {
            tracing::warn!("Failed to delete session on sign-out: {:#}", e);
        }
    }

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    Ok((jar.remove(cookie), Redirect::to(Page::Home.path())).into_response())
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    redirect: Option<String>,
}

/// Only same-site absolute paths that fit in a `Location` header are followed.
fn safe_redirect_target(target: Option<&str>) -> &str {
    match target {
        Some(t)
            if t.starts_with('/')
                && !t.starts_with("//")
                && !t.contains('\\')
                && HeaderValue::from_str(t).is_ok() =>
        {
            t
        }
        _ => "/",
    }
}

pub async fn set_locale(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(query): Query<RedirectQuery>,
    jar: CookieJar,
) -> Response {
    let locale = Locale::resolve(Some(&code), state.default_locale);
    let cookie = Cookie::build((LOCALE_COOKIE, locale.code()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::days(LOCALE_COOKIE_DAYS))
        .build();

    let target = safe_redirect_target(query.redirect.as_deref());
    (jar.add(cookie), Redirect::to(target)).into_response()
}

#[cfg(test)]
mod tests {
    use super::safe_redirect_target;

    #[test]
    fn test_safe_redirect_target() {
        assert_eq!(safe_redirect_target(Some("/blog")), "/blog");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/\\evil")), "/");
        assert_eq!(safe_redirect_target(Some("/\nevil")), "/");
        assert_eq!(safe_redirect_target(Some("/\r\nSet-Cookie: x=1")), "/");
        assert_eq!(safe_redirect_target(Some("/blog\u{7f}")), "/");
        assert_eq!(safe_redirect_target(Some("/press?locale=kk")), "/press?locale=kk");
        assert_eq!(safe_redirect_target(None), "/");
    }
}
