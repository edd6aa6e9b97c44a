use crate::config::{SeoConfig, SiteConfig};
use crate::i18n::{Dictionaries, Locale};
use crate::models::BlogPost;
use serde::Serialize;

/// Pages that carry their own metadata entry in the dictionaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Blog,
    Press,
    Contact,
    Notifications,
    SignIn,
    SignOut,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Blog,
        Page::Press,
        Page::Contact,
        Page::Notifications,
        Page::SignIn,
        Page::SignOut,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Blog => "/blog",
            Self::Press => "/press",
            Self::Contact => "/contact",
            Self::Notifications => "/notifications",
            Self::SignIn => "/sign-in",
            Self::SignOut => "/sign-out",
        }
    }

    /// Section name under `meta.` in the dictionaries.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Blog => "blog",
            Self::Press => "press",
            Self::Contact => "contact",
            Self::Notifications => "notifications",
            Self::SignIn => "sign_in",
            Self::SignOut => "sign_out",
        }
    }

    /// Account pages are kept out of search results.
    pub fn indexable(&self) -> bool {
        matches!(self, Self::Home | Self::Blog | Self::Press | Self::Contact)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    pub locale: String,
    pub alternate_locales: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RobotsMeta {
    pub index: bool,
    pub follow: bool,
}

impl RobotsMeta {
    pub fn content(&self) -> &'static str {
        match (self.index, self.follow) {
            (true, true) => "index, follow",
            (true, false) => "index, nofollow",
            (false, true) => "noindex, follow",
            (false, false) => "noindex, nofollow",
        }
    }
}

/// Everything the layout needs to fill `<head>` for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub locale: Locale,
    pub alternates: Vec<Alternate>,
    pub open_graph: OpenGraph,
    pub robots: RobotsMeta,
    /// Pre-rendered `robots` meta content, for templates.
    pub robots_content: String,
}

/// URL of `path` on the site for `locale`. The default locale gets the
/// bare URL; other locales carry a `locale` query parameter.
pub fn localized_url(base_url: &str, path: &str, locale: Locale, default_locale: Locale) -> String {
    let base = base_url.trim_end_matches('/');
    if locale == default_locale {
        format!("{}{}", base, path)
    } else {
        let sep = if path.contains('?') { '&' } else { '?' };
        format!("{}{}{}locale={}", base, path, sep, locale.code())
    }
}

/// Builds [`PageMetadata`] records. Pure: the output depends only on the
/// configuration, the locale and the embedded dictionaries.
#[derive(Debug, Clone, Copy)]
pub struct MetadataBuilder<'a> {
    site: &'a SiteConfig,
    seo: &'a SeoConfig,
    default_locale: Locale,
    locale: Locale,
}

impl<'a> MetadataBuilder<'a> {
    pub fn new(site: &'a SiteConfig, seo: &'a SeoConfig, default_locale: Locale) -> Self {
        Self {
            site,
            seo,
            default_locale,
            locale: default_locale,
        }
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn build_page(&self, page: Page) -> PageMetadata {
        let dicts = Dictionaries::get();
        let section = format!("meta.{}", page.key());
        let page_title =
            dicts.translate(self.locale, self.default_locale, &format!("{}.title", section));
        let title = if page == Page::Home {
            page_title
        } else {
            format!("{} | {}", page_title, self.site.title)
        };
        let description = dicts.translate(
            self.locale,
            self.default_locale,
            &format!("{}.description", section),
        );
        let page_keywords = self.dictionary_keywords(&format!("{}.keywords", section));

        let alternates = Locale::ALL
            .iter()
            .map(|l| Alternate {
                hreflang: l.code().to_string(),
                href: localized_url(self.site.base_url(), page.path(), *l, self.default_locale),
            })
            .chain(std::iter::once(Alternate {
                hreflang: "x-default".to_string(),
                href: localized_url(
                    self.site.base_url(),
                    page.path(),
                    self.default_locale,
                    self.default_locale,
                ),
            }))
            .collect();

        let robots = RobotsMeta {
            index: page.indexable(),
            follow: true,
        };

        self.assemble(title, description, page_keywords, page.path(), alternates, "website", robots)
    }

    pub fn build_article(&self, post: &BlogPost) -> PageMetadata {
        let builder = self.locale(post.locale);
        let description = if post.excerpt.trim().is_empty() {
            Dictionaries::get().translate(post.locale, self.default_locale, "meta.blog.description")
        } else {
            post.excerpt.clone()
        };
        let path = format!("/blog/{}", post.slug);
        let alternates = vec![Alternate {
            hreflang: post.locale.code().to_string(),
            href: localized_url(self.site.base_url(), &path, post.locale, self.default_locale),
        }];

        builder.assemble(
            format!("{} | {}", post.title, self.site.title),
            description,
            builder.dictionary_keywords("meta.blog.keywords"),
            &path,
            alternates,
            "article",
            RobotsMeta {
                index: true,
                follow: true,
            },
        )
    }

    /// Metadata for a missing page at `path`. The canonical URL points at the
    /// requested path, never at another page.
    pub fn build_not_found(&self, path: &str) -> PageMetadata {
        let dicts = Dictionaries::get();
        let title = format!(
            "{} | {}",
            dicts.translate(self.locale, self.default_locale, "errors.not_found_title"),
            self.site.title
        );
        let description =
            dicts.translate(self.locale, self.default_locale, "errors.not_found_body");
        self.assemble(
            title,
            description,
            Vec::new(),
            path,
            Vec::new(),
            "website",
            RobotsMeta {
                index: false,
                follow: false,
            },
        )
    }

    fn dictionary_keywords(&self, key: &str) -> Vec<String> {
        Dictionaries::get()
            .dictionary(self.locale)
            .lookup_value(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        title: String,
        description: String,
        page_keywords: Vec<String>,
        path: &str,
        alternates: Vec<Alternate>,
        kind: &str,
        robots: RobotsMeta,
    ) -> PageMetadata {
        let mut keywords: Vec<String> = Vec::new();
        for keyword in self.seo.keywords.iter().chain(page_keywords.iter()) {
            let keyword = keyword.trim();
            if !keyword.is_empty() && !keywords.iter().any(|k| k == keyword) {
                keywords.push(keyword.to_string());
            }
        }

        let canonical = localized_url(self.site.base_url(), path, self.locale, self.default_locale);
        let image = self.seo.og_image.as_ref().map(|img| {
            if img.starts_with('/') {
                format!("{}{}", self.site.base_url(), img)
            } else {
                img.clone()
            }
        });

        let open_graph = OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical.clone(),
            site_name: self.site.title.clone(),
            locale: self.locale.og_locale().to_string(),
            alternate_locales: Locale::ALL
                .iter()
                .filter(|l| **l != self.locale)
                .map(|l| l.og_locale().to_string())
                .collect(),
            kind: kind.to_string(),
            image,
        };

        PageMetadata {
            title,
            description,
            keywords,
            canonical,
            locale: self.locale,
            alternates,
            open_graph,
            robots,
            robots_content: robots.content().to_string(),
        }
    }
}
