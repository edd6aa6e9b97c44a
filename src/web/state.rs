use crate::i18n::Locale;
use crate::seo::MetadataBuilder;
use crate::services::markdown::MarkdownRenderer;
use crate::web::security::RateLimiter;
use crate::{Config, Database};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tera::{Tera, Value};

pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub templates: Tera,
    pub markdown: MarkdownRenderer,
    pub default_locale: Locale,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Result<Self> {
        let mut templates = Tera::default();

        templates.register_filter("format_date", format_date_filter);
        templates.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("partials/nav.html", include_str!("../../templates/partials/nav.html")),
            ("partials/head.html", include_str!("../../templates/partials/head.html")),
            ("pages/home.html", include_str!("../../templates/pages/home.html")),
            ("pages/blog.html", include_str!("../../templates/pages/blog.html")),
            ("pages/blog_post.html", include_str!("../../templates/pages/blog_post.html")),
            ("pages/press.html", include_str!("../../templates/pages/press.html")),
            ("pages/contact.html", include_str!("../../templates/pages/contact.html")),
            ("pages/notifications.html", include_str!("../../templates/pages/notifications.html")),
            ("pages/sign_in.html", include_str!("../../templates/pages/sign_in.html")),
            ("pages/sign_out.html", include_str!("../../templates/pages/sign_out.html")),
            ("pages/404.html", include_str!("../../templates/pages/404.html")),
        ])?;

        let default_locale = config.i18n.default_locale();

        Ok(Self {
            config,
            db,
            templates,
            markdown: MarkdownRenderer::new(),
            default_locale,
            rate_limiter: Arc::new(RateLimiter::default()),
        })
    }

    /// Metadata builder for `locale`, bound to this site's configuration.
    pub fn metadata(&self, locale: Locale) -> MetadataBuilder<'_> {
        MetadataBuilder::new(&self.config.site, &self.config.seo, self.default_locale).locale(locale)
    }
}

fn format_date_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("format_date requires a string"))?;

    let format = args
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("%d.%m.%Y");

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Ok(Value::String(dt.format(format).to_string()));
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(Value::String(d.format(format).to_string()));
    }

    Ok(Value::String(date_str.to_string()))
}
