use super::metadata::{localized_url, Page};
use crate::config::SiteConfig;
use crate::i18n::Locale;
use crate::models::BlogPost;
use std::fmt::Write;

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn page_frequency(page: Page) -> (&'static str, &'static str) {
    match page {
        Page::Home => ("daily", "1.0"),
        Page::Blog => ("daily", "0.8"),
        Page::Press => ("monthly", "0.5"),
        _ => ("monthly", "0.4"),
    }
}

/// Sitemap listing every indexable page in every locale, with hreflang
/// alternates, followed by the blog posts.
pub fn generate(site: &SiteConfig, default_locale: Locale, posts: &[BlogPost]) -> String {
    let base = site.base_url();
    let mut urls = String::new();

    for page in Page::ALL.iter().filter(|p| p.indexable()) {
        let (changefreq, priority) = page_frequency(*page);
        for locale in Locale::ALL {
            let _ = writeln!(urls, "  <url>");
            let _ = writeln!(
                urls,
                "    <loc>{}</loc>",
                xml_escape(&localized_url(base, page.path(), locale, default_locale))
            );
            for alt in Locale::ALL {
                let _ = writeln!(
                    urls,
                    r#"    <xhtml:link rel="alternate" hreflang="{}" href="{}"/>"#,
                    alt.code(),
                    xml_escape(&localized_url(base, page.path(), alt, default_locale))
                );
            }
            let _ = writeln!(urls, "    <changefreq>{}</changefreq>", changefreq);
            let _ = writeln!(urls, "    <priority>{}</priority>", priority);
            let _ = writeln!(urls, "  </url>");
        }
    }

    for post in posts {
        let path = format!("/blog/{}", post.slug);
        let lastmod = post
            .updated_at
            .split('T')
            .next()
            .unwrap_or(&post.updated_at);
        let _ = write!(
            urls,
            r#"  <url>
    <loc>{}</loc>
    <lastmod>{}</lastmod>
    <changefreq>weekly</changefreq>
    <priority>0.6</priority>
  </url>
"#,
            xml_escape(&localized_url(base, &path, post.locale, default_locale)),
            xml_escape(lastmod)
        );
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">
{}</urlset>
"#,
        urls
    )
}
