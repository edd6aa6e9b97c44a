use crate::i18n::Locale;
use crate::models::{BlogPost, NewPost};
use crate::services::markdown::MarkdownRenderer;
use crate::services::slug::{generate_slug, validate_slug};
use crate::Database;
use anyhow::Result;
use rusqlite::{OptionalExtension, Row};

pub const EXCERPT_LENGTH: usize = 200;
const MAX_TITLE_LENGTH: usize = 200;

const POST_COLUMNS: &str =
    "id, slug, locale, title, excerpt, body_markdown, body_html, published_at, updated_at";

fn map_post(row: &Row<'_>) -> rusqlite::Result<BlogPost> {
    Ok(BlogPost {
        id: row.get(0)?,
        slug: row.get(1)?,
        locale: Locale::resolve(Some(&row.get::<_, String>(2)?), Locale::default()),
        title: row.get(3)?,
        excerpt: row.get(4)?,
        body_markdown: row.get(5)?,
        body_html: row.get(6)?,
        published_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub fn create_post(db: &Database, renderer: &MarkdownRenderer, post: &NewPost) -> Result<BlogPost> {
    let title = post.title.trim();
    if title.is_empty() {
        anyhow::bail!("Post title cannot be empty");
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        anyhow::bail!("Post title must be {} characters or less", MAX_TITLE_LENGTH);
    }
    if post.body_markdown.trim().is_empty() {
        anyhow::bail!("Post body cannot be empty");
    }

    let slug = match post.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => generate_slug(title),
    };
    if !validate_slug(&slug) {
        anyhow::bail!(
            "Invalid slug '{}': use lowercase letters, numbers and hyphens",
            slug
        );
    }

    let body_html = renderer.render(&post.body_markdown);
    let excerpt = match post.excerpt.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(e) => e.to_string(),
        None => renderer.generate_excerpt(&post.body_markdown, EXCERPT_LENGTH),
    };

    let conn = db.get()?;
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM blog_posts WHERE slug = ? AND locale = ?)",
        (&slug, post.locale.code()),
        |row| row.get(0),
    )?;
    if exists {
        anyhow::bail!(
            "A '{}' post with slug '{}' already exists",
            post.locale,
            slug
        );
    }

    conn.execute(
        "INSERT INTO blog_posts (slug, locale, title, excerpt, body_markdown, body_html) VALUES (?, ?, ?, ?, ?, ?)",
        (
            &slug,
            post.locale.code(),
            title,
            &excerpt,
            &post.body_markdown,
            &body_html,
        ),
    )?;
    let id = conn.last_insert_rowid();
    let created = conn.query_row(
        &format!("SELECT {} FROM blog_posts WHERE id = ?", POST_COLUMNS),
        [id],
        map_post,
    )?;
    tracing::info!(id, slug = %created.slug, locale = %created.locale, "Blog post published");
    Ok(created)
}

pub fn list_posts(db: &Database, locale: Locale, limit: usize, offset: usize) -> Result<Vec<BlogPost>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM blog_posts WHERE locale = ? ORDER BY published_at DESC, id DESC LIMIT ? OFFSET ?",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map((locale.code(), limit, offset), map_post)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(posts)
}

pub fn count_posts(db: &Database, locale: Locale) -> Result<usize> {
    let conn = db.get()?;
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM blog_posts WHERE locale = ?",
        [locale.code()],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as usize)
}

pub fn get_post(db: &Database, slug: &str, locale: Locale) -> Result<Option<BlogPost>> {
    let conn = db.get()?;
    let post = conn
        .query_row(
            &format!(
                "SELECT {} FROM blog_posts WHERE slug = ? AND locale = ?",
                POST_COLUMNS
            ),
            (slug, locale.code()),
            map_post,
        )
        .optional()?;
    Ok(post)
}

/// Every post in every locale, newest first. Used for the sitemap.
pub fn list_all(db: &Database) -> Result<Vec<BlogPost>> {
    let conn = db.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM blog_posts ORDER BY published_at DESC, id DESC",
        POST_COLUMNS
    ))?;
    let posts = stmt
        .query_map([], map_post)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(posts)
}
