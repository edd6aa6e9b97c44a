#[cfg(test)]
mod tests {

    mod slug_tests {
        use crate::services::slug::{generate_slug, validate_slug, MAX_SLUG_LENGTH};

        #[test]
        fn test_generate_slug_basic() {
            assert_eq!(generate_slug("Hello World"), "hello-world");
        }

        #[test]
        fn test_generate_slug_special_characters() {
            assert_eq!(generate_slug("Save food, save money!"), "save-food-save-money");
        }

        #[test]
        fn test_generate_slug_cyrillic_is_transliterated() {
            let slug = generate_slug("Спасаем еду вместе");
            assert!(!slug.is_empty());
            assert!(validate_slug(&slug), "not a valid slug: {}", slug);
        }

        #[test]
        fn test_generate_slug_kazakh_is_transliterated() {
            let slug = generate_slug("Тамақты бірге құтқарамыз");
            assert!(!slug.is_empty());
            assert!(validate_slug(&slug), "not a valid slug: {}", slug);
        }

        #[test]
        fn test_generate_slug_truncates_long_titles() {
            let title = "word ".repeat(100);
            let slug = generate_slug(&title);
            assert!(slug.len() <= MAX_SLUG_LENGTH);
            assert!(!slug.ends_with('-'));
        }

        #[test]
        fn test_validate_slug() {
            assert!(validate_slug("surplus-bread-2024"));
            assert!(!validate_slug(""));
            assert!(!validate_slug("Hello-World"));
            assert!(!validate_slug("hello_world"));
            assert!(!validate_slug("hello world"));
        }
    }

    mod markdown_tests {
        use crate::services::markdown::MarkdownRenderer;

        #[test]
        fn test_render_basic_markdown() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("Hello **world**");
            assert!(html.contains("<strong>world</strong>"));
            assert!(html.contains("<p>"));
        }

        #[test]
        fn test_render_strips_scripts() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("Text\n\n<script>alert('x')</script>\n");
            assert!(!html.contains("<script"));
            assert!(!html.contains("alert"));
        }

        #[test]
        fn test_render_links_get_rel() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("[shop](https://example.com)");
            assert!(html.contains("noopener noreferrer"));
        }

        #[test]
        fn test_render_tables() {
            let renderer = MarkdownRenderer::new();
            let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
            assert!(html.contains("<table>"));
            assert!(html.contains("<td>1</td>"));
        }

        #[test]
        fn test_excerpt_skips_headings_and_code() {
            let renderer = MarkdownRenderer::new();
            let md = "# Title\n\nFirst paragraph.\n\n```\nlet x = 1;\n```\n\nSecond.";
            let excerpt = renderer.generate_excerpt(md, 200);
            assert_eq!(excerpt, "First paragraph. Second.");
        }

        #[test]
        fn test_excerpt_cuts_at_word_boundary() {
            let renderer = MarkdownRenderer::new();
            let excerpt = renderer.generate_excerpt("one two three four five", 12);
            assert_eq!(excerpt, "one two...");
        }

        #[test]
        fn test_excerpt_handles_cyrillic() {
            let renderer = MarkdownRenderer::new();
            let excerpt = renderer.generate_excerpt("Свежий хлеб со скидкой каждый вечер", 15);
            assert!(excerpt.ends_with("..."));
            assert!(excerpt.starts_with("Свежий хлеб"));
        }

        #[test]
        fn test_reading_time() {
            let renderer = MarkdownRenderer::new();
            assert_eq!(renderer.reading_time(""), 1);
            assert_eq!(renderer.reading_time(&"word ".repeat(200)), 1);
            assert_eq!(renderer.reading_time(&"word ".repeat(201)), 2);
        }
    }

    mod user_role_tests {
        use crate::models::UserRole;

        #[test]
        fn test_parse_roles() {
            assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
            assert_eq!("Partner".parse::<UserRole>(), Ok(UserRole::Partner));
            assert_eq!("CUSTOMER".parse::<UserRole>(), Ok(UserRole::Customer));
            assert!("author".parse::<UserRole>().is_err());
        }

        #[test]
        fn test_display_round_trips() {
            for role in [UserRole::Admin, UserRole::Partner, UserRole::Customer] {
                assert_eq!(role.to_string().parse::<UserRole>(), Ok(role));
            }
        }
    }

    mod auth_tests {
        use crate::services::auth::{
            generate_session_token, hash_password, validate_email, validate_password,
            verify_password,
        };

        #[test]
        fn test_hash_and_verify() {
            let hash = hash_password("Password123").expect("hash");
            assert!(verify_password("Password123", &hash));
            assert!(!verify_password("Password124", &hash));
        }

        #[test]
        fn test_verify_rejects_malformed_hash() {
            assert!(!verify_password("Password123", "not-a-hash"));
        }

        #[test]
        fn test_password_rules() {
            assert!(validate_password("Password123").is_ok());
            assert!(validate_password("short1A").is_err());
            assert!(validate_password("password123").is_err());
            assert!(validate_password("PASSWORD123").is_err());
            assert!(validate_password("Passwordxyz").is_err());
        }

        #[test]
        fn test_email_rules() {
            assert!(validate_email("partner@foodsave.kz").is_ok());
            assert!(validate_email("").is_err());
            assert!(validate_email("no-at-sign").is_err());
            assert!(validate_email("a@nodot").is_err());
            assert!(validate_email("a b@foodsave.kz").is_err());
        }

        #[test]
        fn test_session_tokens_are_unique() {
            let a = generate_session_token();
            let b = generate_session_token();
            assert_ne!(a, b);
            assert_eq!(a.len(), 43);
        }
    }

    mod contact_tests {
        use crate::i18n::Locale;
        use crate::models::NewContactMessage;
        use crate::services::contact::{validate, ContactError};

        fn message(name: &str, email: &str, body: &str) -> NewContactMessage {
            NewContactMessage {
                name: name.to_string(),
                email: email.to_string(),
                message: body.to_string(),
                locale: Locale::Kk,
            }
        }

        #[test]
        fn test_valid_message_is_trimmed() {
            let clean = validate(&message("  Айгерим ", " a@foodsave.kz ", " Сәлем! ")).expect("valid");
            assert_eq!(clean.name, "Айгерим");
            assert_eq!(clean.email, "a@foodsave.kz");
            assert_eq!(clean.message, "Сәлем!");
            assert_eq!(clean.locale, Locale::Kk);
        }

        #[test]
        fn test_rejects_blank_name() {
            assert_eq!(
                validate(&message("   ", "a@foodsave.kz", "hi")),
                Err(ContactError::InvalidName)
            );
        }

        #[test]
        fn test_rejects_bad_email() {
            assert_eq!(
                validate(&message("Dana", "dana", "hi")),
                Err(ContactError::InvalidEmail)
            );
        }

        #[test]
        fn test_rejects_oversized_message() {
            let body = "x".repeat(5001);
            assert_eq!(
                validate(&message("Dana", "d@foodsave.kz", &body)),
                Err(ContactError::InvalidMessage)
            );
        }

        #[test]
        fn test_error_keys_are_translated() {
            let dicts = crate::i18n::Dictionaries::get();
            for err in [
                ContactError::InvalidName,
                ContactError::InvalidEmail,
                ContactError::InvalidMessage,
            ] {
                for locale in Locale::ALL {
                    assert_ne!(dicts.translate(locale, Locale::Ru, err.message_key()), err.message_key());
                }
            }
        }
    }

    mod seo_metadata_tests {
        use crate::config::{SeoConfig, SiteConfig};
        use crate::i18n::{Dictionaries, Locale};
        use crate::models::BlogPost;
        use crate::seo::{localized_url, MetadataBuilder, Page};

        fn site() -> SiteConfig {
            SiteConfig {
                title: "FoodSave".to_string(),
                description: "Surplus food".to_string(),
                url: "https://foodsave.kz/".to_string(),
            }
        }

        fn seo() -> SeoConfig {
            SeoConfig {
                keywords: vec!["FoodSave".to_string(), "FoodSave".to_string()],
                og_image: Some("/static/og.png".to_string()),
            }
        }

        fn post(locale: Locale) -> BlogPost {
            BlogPost {
                id: 1,
                slug: "first-post".to_string(),
                locale,
                title: "Первый пост".to_string(),
                excerpt: "Короткое описание".to_string(),
                body_markdown: "Текст".to_string(),
                body_html: "<p>Текст</p>".to_string(),
                published_at: "2024-05-01T10:00:00Z".to_string(),
                updated_at: "2024-05-02T10:00:00Z".to_string(),
            }
        }

        #[test]
        fn test_localized_url() {
            assert_eq!(
                localized_url("https://foodsave.kz/", "/blog", Locale::Ru, Locale::Ru),
                "https://foodsave.kz/blog"
            );
            assert_eq!(
                localized_url("https://foodsave.kz", "/blog", Locale::Kk, Locale::Ru),
                "https://foodsave.kz/blog?locale=kk"
            );
            assert_eq!(
                localized_url("https://foodsave.kz", "/blog?page=2", Locale::Kk, Locale::Ru),
                "https://foodsave.kz/blog?page=2&locale=kk"
            );
        }

        #[test]
        fn test_build_page_is_idempotent() {
            let (site, seo) = (site(), seo());
            for locale in Locale::ALL {
                let builder = MetadataBuilder::new(&site, &seo, Locale::Ru).locale(locale);
                for page in Page::ALL {
                    assert_eq!(builder.build_page(page), builder.build_page(page));
                }
            }
        }

        #[test]
        fn test_home_title_is_not_suffixed() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru).build_page(Page::Home);
            assert_eq!(
                meta.title,
                Dictionaries::get().translate(Locale::Ru, Locale::Ru, "meta.home.title")
            );
        }

        #[test]
        fn test_inner_page_title_has_site_suffix() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru)
                .locale(Locale::Kk)
                .build_page(Page::Blog);
            assert!(meta.title.ends_with(" | FoodSave"));
            assert_eq!(meta.locale, Locale::Kk);
            assert_eq!(meta.open_graph.locale, Locale::Kk.og_locale());
        }

        #[test]
        fn test_canonical_and_alternates() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru)
                .locale(Locale::Kk)
                .build_page(Page::Press);
            assert_eq!(meta.canonical, "https://foodsave.kz/press?locale=kk");
            assert_eq!(meta.alternates.len(), Locale::ALL.len() + 1);

            let x_default = meta.alternates.last().expect("x-default");
            assert_eq!(x_default.hreflang, "x-default");
            assert_eq!(x_default.href, "https://foodsave.kz/press");
        }

        #[test]
        fn test_keywords_are_deduplicated() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru).build_page(Page::Home);
            assert_eq!(meta.keywords.iter().filter(|k| *k == "FoodSave").count(), 1);
            assert!(meta.keywords.len() > 1);
        }

        #[test]
        fn test_account_pages_are_noindex() {
            let (site, seo) = (site(), seo());
            let builder = MetadataBuilder::new(&site, &seo, Locale::Ru);
            for page in [Page::SignIn, Page::SignOut, Page::Notifications] {
                let meta = builder.build_page(page);
                assert!(!meta.robots.index);
                assert_eq!(meta.robots_content, "noindex, follow");
            }
            assert_eq!(builder.build_page(Page::Home).robots_content, "index, follow");
        }

        #[test]
        fn test_og_image_is_absolute() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru).build_page(Page::Contact);
            assert_eq!(
                meta.open_graph.image.as_deref(),
                Some("https://foodsave.kz/static/og.png")
            );
            assert_eq!(meta.open_graph.kind, "website");
            assert_eq!(meta.open_graph.alternate_locales, vec!["kk_KZ".to_string()]);
        }

        #[test]
        fn test_build_article_uses_post_locale() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru)
                .locale(Locale::Ru)
                .build_article(&post(Locale::Kk));
            assert_eq!(meta.locale, Locale::Kk);
            assert_eq!(meta.title, "Первый пост | FoodSave");
            assert_eq!(meta.description, "Короткое описание");
            assert_eq!(meta.canonical, "https://foodsave.kz/blog/first-post?locale=kk");
            assert_eq!(meta.open_graph.kind, "article");
            assert_eq!(meta.alternates.len(), 1);
        }

        #[test]
        fn test_build_article_falls_back_to_blog_description() {
            let (site, seo) = (site(), seo());
            let mut p = post(Locale::Ru);
            p.excerpt = "  ".to_string();
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru).build_article(&p);
            assert_eq!(
                meta.description,
                Dictionaries::get().translate(Locale::Ru, Locale::Ru, "meta.blog.description")
            );
        }

        #[test]
        fn test_not_found_is_noindex_nofollow() {
            let (site, seo) = (site(), seo());
            let meta = MetadataBuilder::new(&site, &seo, Locale::Ru).build_not_found("/missing");
            assert_eq!(meta.robots_content, "noindex, nofollow");
            assert!(meta.alternates.is_empty());
            assert!(meta.keywords.iter().all(|k| k == "FoodSave"));
        }

        #[test]
        fn test_not_found_canonical_is_requested_path() {
            let (site, seo) = (site(), seo());
            let builder = MetadataBuilder::new(&site, &seo, Locale::Ru);

            let meta = builder.build_not_found("/no-such-page");
            assert_eq!(meta.canonical, "https://foodsave.kz/no-such-page");
            assert_eq!(meta.open_graph.url, meta.canonical);

            let meta = builder.locale(Locale::Kk).build_not_found("/no-such-page");
            assert_eq!(meta.canonical, "https://foodsave.kz/no-such-page?locale=kk");
        }
    }

    mod robots_tests {
        use crate::config::{RobotsConfig, SiteConfig};
        use crate::seo::{RobotsPolicy, PRIVATE_PREFIXES};

        fn site() -> SiteConfig {
            SiteConfig {
                title: "FoodSave".to_string(),
                description: String::new(),
                url: "https://foodsave.kz/".to_string(),
            }
        }

        #[test]
        fn test_default_policy_renders_crawlers_and_sitemap() {
            let policy = RobotsPolicy::from_config(&site(), &RobotsConfig::default());
            let txt = policy.render();

            assert!(txt.contains("User-agent: *"));
            assert!(txt.contains("User-agent: Yandex"));
            assert!(txt.contains("User-agent: Googlebot"));
            assert!(txt.contains("Crawl-delay: 2"));
            assert!(txt.trim_end().ends_with("Sitemap: https://foodsave.kz/sitemap.xml"));
        }

        #[test]
        fn test_private_prefixes_always_disallowed() {
            let configs = [
                RobotsConfig::default(),
                RobotsConfig {
                    crawlers: vec![],
                    crawl_delay: 0,
                    disallow: vec![],
                },
                RobotsConfig {
                    crawlers: vec!["Bingbot".to_string(), "*".to_string()],
                    crawl_delay: 10,
                    disallow: vec!["/drafts".to_string(), "/api/".to_string()],
                },
            ];

            for config in &configs {
                let policy = RobotsPolicy::from_config(&site(), config);
                let txt = policy.render();
                for rule in &policy.rules {
                    for prefix in PRIVATE_PREFIXES {
                        assert!(rule.disallow.iter().any(|p| p == prefix));
                    }
                }
                for prefix in PRIVATE_PREFIXES {
                    assert!(txt.contains(&format!("Disallow: {}", prefix)));
                }
                assert!(txt.contains("Sitemap: https://foodsave.kz/sitemap.xml"));
            }
        }

        #[test]
        fn test_extra_disallow_is_deduplicated() {
            let config = RobotsConfig {
                crawlers: vec![],
                crawl_delay: 0,
                disallow: vec!["/drafts".to_string(), "/api/".to_string()],
            };
            let policy = RobotsPolicy::from_config(&site(), &config);
            assert_eq!(policy.rules.len(), 1);
            let rule = &policy.rules[0];
            assert_eq!(rule.disallow.iter().filter(|p| *p == "/api/").count(), 1);
            assert!(rule.disallow.iter().any(|p| p == "/drafts"));
            assert_eq!(rule.crawl_delay, None);
        }

        #[test]
        fn test_is_allowed() {
            let policy = RobotsPolicy::from_config(&site(), &RobotsConfig::default());
            assert!(policy.is_allowed("Yandex", "/"));
            assert!(policy.is_allowed("Yandex", "/blog/first-post"));
            assert!(policy.is_allowed("SomeBot", "/press"));
            assert!(!policy.is_allowed("Yandex", "/api/dictionary"));
            assert!(!policy.is_allowed("googlebot", "/sign-in"));
            assert!(!policy.is_allowed("SomeBot", "/notifications"));
        }
    }

    mod sitemap_tests {
        use crate::config::SiteConfig;
        use crate::i18n::Locale;
        use crate::models::BlogPost;
        use crate::seo::sitemap::generate;

        fn site() -> SiteConfig {
            SiteConfig {
                title: "FoodSave".to_string(),
                description: String::new(),
                url: "https://foodsave.kz".to_string(),
            }
        }

        #[test]
        fn test_sitemap_lists_indexable_pages_in_every_locale() {
            let xml = generate(&site(), Locale::Ru, &[]);
            assert!(xml.starts_with("<?xml"));
            assert_eq!(xml.matches("<url>").count(), 8);
            assert!(xml.contains("<loc>https://foodsave.kz/</loc>"));
            assert!(xml.contains("<loc>https://foodsave.kz/blog?locale=kk</loc>"));
            assert!(xml.contains(r#"hreflang="kk""#));
            assert!(!xml.contains("/sign-in"));
            assert!(!xml.contains("/notifications"));
        }

        #[test]
        fn test_sitemap_includes_posts() {
            let post = BlogPost {
                id: 7,
                slug: "bread-and-more".to_string(),
                locale: Locale::Kk,
                title: "Нан".to_string(),
                excerpt: String::new(),
                body_markdown: String::new(),
                body_html: String::new(),
                published_at: "2024-05-01T10:00:00Z".to_string(),
                updated_at: "2024-05-03T08:30:00Z".to_string(),
            };
            let xml = generate(&site(), Locale::Ru, &[post]);
            assert_eq!(xml.matches("<url>").count(), 9);
            assert!(xml.contains("<loc>https://foodsave.kz/blog/bread-and-more?locale=kk</loc>"));
            assert!(xml.contains("<lastmod>2024-05-03</lastmod>"));
        }
    }

    mod config_tests {
        use crate::config::Config;
        use crate::i18n::Locale;

        const MINIMAL: &str = r#"
[site]
title = "FoodSave"
description = "Surplus food"
url = "https://foodsave.kz/"

[database]
path = "./data/foodsave.db"
"#;

        #[test]
        fn test_minimal_config_gets_defaults() {
            let config = Config::parse(MINIMAL).expect("valid config");
            assert_eq!(config.site.base_url(), "https://foodsave.kz");
            assert_eq!(config.server.port, 3000);
            assert_eq!(config.i18n.default_locale(), Locale::Ru);
            assert_eq!(config.robots.crawlers, vec!["Yandex", "Googlebot"]);
            assert_eq!(config.robots.crawl_delay, 2);
            assert_eq!(config.auth.session_lifetime_days, 7);
            assert!(config.database.pool_size > 0);
        }

        #[test]
        fn test_default_locale_alias() {
            let toml = format!("{}\n[i18n]\ndefault_locale = \"kz\"\n", MINIMAL);
            let config = Config::parse(&toml).expect("valid config");
            assert_eq!(config.i18n.default_locale(), Locale::Kk);
        }

        #[test]
        fn test_rejects_unknown_default_locale() {
            let toml = format!("{}\n[i18n]\ndefault_locale = \"en\"\n", MINIMAL);
            assert!(Config::parse(&toml).is_err());
        }

        #[test]
        fn test_rejects_bad_url() {
            let toml = MINIMAL.replace("https://foodsave.kz/", "ftp://foodsave.kz");
            assert!(Config::parse(&toml).is_err());
            let toml = MINIMAL.replace("https://foodsave.kz/", "not a url");
            assert!(Config::parse(&toml).is_err());
        }

        #[test]
        fn test_rejects_large_crawl_delay() {
            let toml = format!("{}\n[robots]\ncrawl_delay = 61\n", MINIMAL);
            assert!(Config::parse(&toml).is_err());
        }

        #[test]
        fn test_rejects_relative_disallow() {
            let toml = format!("{}\n[robots]\ndisallow = [\"drafts\"]\n", MINIMAL);
            assert!(Config::parse(&toml).is_err());
        }

        #[test]
        fn test_rejects_zero_pool() {
            let toml = format!("{}pool_size = 0\n", MINIMAL);
            assert!(Config::parse(&toml).is_err());
        }

        #[test]
        fn test_session_lifetime_bounds() {
            for days in ["0", "-1", "366", "9223372036854775807"] {
                let toml = format!("{}\n[auth]\nsession_lifetime_days = {}\n", MINIMAL, days);
                assert!(Config::parse(&toml).is_err(), "{}", days);
            }
            let toml = format!("{}\n[auth]\nsession_lifetime_days = 365\n", MINIMAL);
            assert_eq!(Config::parse(&toml).unwrap().auth.session_lifetime_days, 365);
        }
    }
}
