use ammonia::Builder;
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Renders blog Markdown to sanitized HTML.
pub struct MarkdownRenderer {
    sanitizer: Builder<'static>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut tags = Builder::default().clone_tags();
        for tag in ["pre", "code", "table", "thead", "tbody", "tr", "th", "td", "del", "figure", "figcaption"] {
            tags.insert(tag);
        }

        let mut attrs = Builder::default().clone_tag_attributes();
        attrs.insert(
            "img",
            ["src", "alt", "title", "width", "height", "loading"]
                .iter()
                .cloned()
                .collect(),
        );

        let mut sanitizer = Builder::default();
        sanitizer
            .tags(tags)
            .tag_attributes(attrs)
            .link_rel(Some("noopener noreferrer"));

        Self { sanitizer }
    }

    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, options());
        let mut raw = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut raw, parser);
        self.sanitizer.clean(&raw).to_string()
    }

    /// Plain-text summary of at most `max_len` characters (plus an ellipsis),
    /// cut at a word boundary. Headings and code blocks are skipped.
    pub fn generate_excerpt(&self, markdown: &str, max_len: usize) -> String {
        let mut text = String::new();
        let mut skip_depth = 0usize;

        for event in Parser::new_ext(markdown, options()) {
            match event {
                Event::Start(Tag::Heading { .. }) | Event::Start(Tag::CodeBlock(_)) => {
                    skip_depth += 1
                }
                Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::CodeBlock) => {
                    skip_depth = skip_depth.saturating_sub(1)
                }
                Event::Text(t) | Event::Code(t) if skip_depth == 0 => {
                    if !text.is_empty() && !text.ends_with(' ') {
                        text.push(' ');
                    }
                    text.push_str(t.trim());
                }
                Event::SoftBreak | Event::HardBreak if skip_depth == 0 => text.push(' '),
                _ => {}
            }
        }

        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.chars().count() <= max_len {
            return text;
        }

        let truncated: String = text.chars().take(max_len).collect();
        match truncated.rfind(' ') {
            Some(pos) if pos > 0 => format!("{}...", &truncated[..pos]),
            _ => format!("{}...", truncated),
        }
    }

    /// Estimated reading time in minutes at 200 words per minute, minimum 1.
    pub fn reading_time(&self, markdown: &str) -> u32 {
        let words = markdown.split_whitespace().count();
        ((words as f64 / 200.0).ceil() as u32).max(1)
    }
}
