use crate::i18n::Locale;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    pub id: i64,
    pub slug: String,
    pub locale: Locale,
    pub title: String,
    pub excerpt: String,
    #[serde(skip_serializing)]
    pub body_markdown: String,
    pub body_html: String,
    pub published_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub locale: Locale,
    pub excerpt: Option<String>,
    pub body_markdown: String,
}
