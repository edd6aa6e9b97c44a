use crate::i18n::{Dictionaries, Locale};
use crate::models::{NewContactMessage, User};
use crate::seo::{Page, PageMetadata};
use crate::services::{blog, contact, notifications};
use crate::web::error::AppResult;
use crate::web::extractors::{OptionalUser, RequestLocale};
use crate::web::navigation::nav_links;
use crate::web::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

const HOME_POSTS: usize = 3;
const POSTS_PER_PAGE: usize = 10;
const MAX_PAGE: usize = 10000;
const NOTIFICATIONS_SHOWN: usize = 50;

#[derive(Serialize)]
struct LocaleOption {
    code: &'static str,
    name: &'static str,
    active: bool,
    href: String,
}

fn locale_options(current: Locale, path: &str) -> Vec<LocaleOption> {
    let redirect: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    Locale::ALL
        .iter()
        .map(|l| LocaleOption {
            code: l.code(),
            name: l.native_name(),
            active: *l == current,
            href: format!("/locale/{}?redirect={}", l.code(), redirect),
        })
        .collect()
}

/// Suffix carried on internal links so an explicit `?locale=` survives
/// navigation. Empty for the default locale.
fn locale_query(locale: Locale, default: Locale) -> String {
    if locale == default {
        String::new()
    } else {
        format!("?locale={}", locale.code())
    }
}

pub(crate) fn make_context(
    state: &AppState,
    user: &Option<User>,
    locale: Locale,
    path: &str,
    meta: &PageMetadata,
) -> Context {
    let mut ctx = Context::new();
    ctx.insert("site", &state.config.site);
    ctx.insert("user", user);
    ctx.insert("locale", locale.code());
    ctx.insert("locale_query", &locale_query(locale, state.default_locale));
    ctx.insert("locales", &locale_options(locale, path));
    ctx.insert("t", Dictionaries::get().dictionary(locale).messages());
    ctx.insert(
        "nav",
        &nav_links(user.is_some(), path, locale, state.default_locale),
    );
    ctx.insert("meta", meta);
    ctx
}

pub(crate) fn render_page(
    state: &AppState,
    template: &str,
    ctx: &Context,
    locale: Locale,
    status: StatusCode,
) -> AppResult<Response> {
    let html = state.templates.render(template, ctx)?;
    Ok((status, [(header::CONTENT_LANGUAGE, locale.code())], Html(html)).into_response())
}

fn simple_page(
    state: &AppState,
    user: &Option<User>,
    locale: Locale,
    page: Page,
    template: &str,
) -> AppResult<Response> {
    let meta = state.metadata(locale).build_page(page);
    let ctx = make_context(state, user, locale, page.path(), &meta);
    render_page(state, template, &ctx, locale, StatusCode::OK)
}

pub async fn home(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    let posts = blog::list_posts(&state.db, locale, HOME_POSTS, 0)?;

    let meta = state.metadata(locale).build_page(Page::Home);
    let mut ctx = make_context(&state, &user, locale, Page::Home.path(), &meta);
    ctx.insert("posts", &posts);

    render_page(&state, "pages/home.html", &ctx, locale, StatusCode::OK)
}

#[derive(Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    page: usize,
}

fn default_page() -> usize {
    1
}

pub async fn blog_index(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
    Query(pagination): Query<Pagination>,
) -> AppResult<Response> {
    let page = pagination.page.clamp(1, MAX_PAGE);
    let offset = (page - 1) * POSTS_PER_PAGE;
    let posts = blog::list_posts(&state.db, locale, POSTS_PER_PAGE, offset)?;
    let total = blog::count_posts(&state.db, locale)?;
    let total_pages = total.div_ceil(POSTS_PER_PAGE);

    let meta = state.metadata(locale).build_page(Page::Blog);
    let mut ctx = make_context(&state, &user, locale, Page::Blog.path(), &meta);
    ctx.insert("posts", &posts);
    ctx.insert("page", &page);
    ctx.insert("total_pages", &total_pages);

    render_page(&state, "pages/blog.html", &ctx, locale, StatusCode::OK)
}

pub async fn blog_post(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    if let Some(post) = blog::get_post(&state.db, &slug, locale)? {
        let meta = state.metadata(locale).build_article(&post);
        let path = format!("/blog/{}", post.slug);
        let mut ctx = make_context(&state, &user, locale, &path, &meta);
        ctx.insert("post", &post);
        ctx.insert("reading_time", &state.markdown.reading_time(&post.body_markdown));
        return render_page(&state, "pages/blog_post.html", &ctx, locale, StatusCode::OK);
    }

    // Posts are written per language; send visitors to the one that exists.
    for other in Locale::ALL.iter().filter(|l| **l != locale) {
        if blog::get_post(&state.db, &slug, *other)?.is_some() {
            let target = format!("/blog/{}?locale={}", slug, other.code());
            return Ok(Redirect::to(&target).into_response());
        }
    }

    render_not_found(&state, &user, locale, &format!("/blog/{}", slug))
}

pub async fn press(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    simple_page(&state, &user, locale, Page::Press, "pages/press.html")
}

pub async fn contact_form(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    simple_page(&state, &user, locale, Page::Contact, "pages/contact.html")
}

#[derive(Deserialize, Serialize)]
pub struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

pub async fn contact_submit(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
    Form(form): Form<ContactForm>,
) -> AppResult<Response> {
    let meta = state.metadata(locale).build_page(Page::Contact);
    let mut ctx = make_context(&state, &user, locale, Page::Contact.path(), &meta);

    let msg = NewContactMessage {
        name: form.name.clone(),
        email: form.email.clone(),
        message: form.message.clone(),
        locale,
    };

    match contact::validate(&msg) {
        Ok(clean) => {
            contact::submit(&state.db, &clean)?;
            ctx.insert("success", &true);
            render_page(&state, "pages/contact.html", &ctx, locale, StatusCode::OK)
        }
        Err(e) => {
            tracing::debug!("Rejected contact form: {}", e);
            ctx.insert(
                "error",
                &Dictionaries::get().translate(locale, state.default_locale, e.message_key()),
            );
            ctx.insert("form", &form);
            render_page(
                &state,
                "pages/contact.html",
                &ctx,
                locale,
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    }
}

pub async fn notifications_page(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
) -> AppResult<Response> {
    let Some(current) = user.as_ref() else {
        return Ok(Redirect::to(Page::SignIn.path()).into_response());
    };

    let items = notifications::list_for_user(&state.db, current.id, NOTIFICATIONS_SHOWN)?;
    let unread = notifications::unread_count(&state.db, current.id)?;

    let meta = state.metadata(locale).build_page(Page::Notifications);
    let mut ctx = make_context(&state, &user, locale, Page::Notifications.path(), &meta);
    ctx.insert("notifications", &items);
    ctx.insert("unread", &unread);

    render_page(&state, "pages/notifications.html", &ctx, locale, StatusCode::OK)
}

pub async fn notifications_mark_read(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
) -> AppResult<Response> {
    let Some(current) = user else {
        return Ok(Redirect::to(Page::SignIn.path()).into_response());
    };

    let updated = notifications::mark_all_read(&state.db, current.id)?;
    tracing::debug!(user_id = current.id, updated, "Marked notifications read");
    Ok(Redirect::to(Page::Notifications.path()).into_response())
}

pub(crate) fn render_not_found(
    state: &AppState,
    user: &Option<User>,
    locale: Locale,
    path: &str,
) -> AppResult<Response> {
    let meta = state.metadata(locale).build_not_found(path);
    let ctx = make_context(state, user, locale, path, &meta);
    render_page(state, "pages/404.html", &ctx, locale, StatusCode::NOT_FOUND)
}

pub async fn not_found(
    State(state): State<Arc<AppState>>,
    OptionalUser(user): OptionalUser,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
) -> AppResult<Response> {
    render_not_found(&state, &user, locale, uri.path())
}
