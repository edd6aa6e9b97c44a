use crate::i18n::Locale;
use crate::models::NewPost;
use crate::services::blog;
use crate::services::markdown::MarkdownRenderer;
use crate::{Config, Database};
use anyhow::{Context, Result};
use std::path::Path;

use super::BlogCommand;

pub async fn run(config_path: &Path, command: BlogCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;
    db.migrate()?;

    match command {
        BlogCommand::Publish {
            title,
            locale,
            file,
            slug,
            excerpt,
        } => {
            // Publishing is explicit, so an unknown locale is an error here.
            let locale: Locale = locale.parse()?;
            let body_markdown = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let post = blog::create_post(
                &db,
                &MarkdownRenderer::new(),
                &NewPost {
                    title,
                    slug,
                    locale,
                    excerpt,
                    body_markdown,
                },
            )?;

            tracing::info!(
                post_id = post.id,
                locale = %post.locale,
                "Published /blog/{}",
                post.slug
            );
        }
        BlogCommand::List => {
            let posts = blog::list_all(&db)?;

            println!("{:<6} {:<40} {:<20}", "LOCALE", "SLUG", "PUBLISHED");
            println!("{}", "-".repeat(70));
            for post in posts {
                println!("{:<6} {:<40} {:<20}", post.locale.code(), post.slug, post.published_at);
            }
        }
    }

    Ok(())
}
