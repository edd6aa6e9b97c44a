use crate::i18n::Locale;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub robots: RobotsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    /// Public base URL, used for canonical links, the sitemap and robots.txt.
    pub url: String,
}

impl SiteConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
        }
    }
}

impl I18nConfig {
    /// The configured fallback locale. `validate` guarantees the code parses.
    pub fn default_locale(&self) -> Locale {
        Locale::resolve(Some(&self.default_locale), Locale::default())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SeoConfig {
    /// Site-wide keywords, prepended to every page's own keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Absolute or site-relative URL of the default social sharing image.
    #[serde(default)]
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RobotsConfig {
    /// Crawlers that get their own rule block with a crawl delay.
    #[serde(default = "default_crawlers")]
    pub crawlers: Vec<String>,
    #[serde(default = "default_crawl_delay")]
    pub crawl_delay: u32,
    /// Extra path prefixes to hide, on top of the built-in private ones.
    #[serde(default)]
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            crawlers: default_crawlers(),
            crawl_delay: default_crawl_delay(),
            disallow: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default = "default_session_days")]
    pub session_lifetime_days: i64,
    #[serde(default)]
    pub secure_cookies: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_days: default_session_days(),
            secure_cookies: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetsConfig {
    #[serde(default = "default_assets_dir")]
    pub dir: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pool_size() -> u32 {
    10
}

fn default_locale() -> String {
    Locale::default().code().to_string()
}

fn default_crawlers() -> Vec<String> {
    vec!["Yandex".to_string(), "Googlebot".to_string()]
}

fn default_crawl_delay() -> u32 {
    2
}

fn default_session_days() -> i64 {
    7
}

fn default_assets_dir() -> String {
    "./static".to_string()
}

pub const MAX_CRAWL_DELAY: u32 = 60;
pub const MAX_SESSION_DAYS: i64 = 365;

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!(
                "Could not read config file '{}': {}. Run `foodsave init` to create one.",
                path.display(),
                e
            )
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.site.url)
            .map_err(|e| anyhow::anyhow!("site.url '{}' is not a valid URL: {}", self.site.url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("site.url must use http or https");
        }
        Locale::from_code(&self.i18n.default_locale)?;
        if self.database.pool_size == 0 {
            anyhow::bail!("database.pool_size must be greater than 0");
        }
        if self.robots.crawl_delay > MAX_CRAWL_DELAY {
            anyhow::bail!("robots.crawl_delay must be {} or less", MAX_CRAWL_DELAY);
        }
        if let Some(prefix) = self.robots.disallow.iter().find(|p| !p.starts_with('/')) {
            anyhow::bail!("robots.disallow entry '{}' must start with '/'", prefix);
        }
        if !(1..=MAX_SESSION_DAYS).contains(&self.auth.session_lifetime_days) {
            anyhow::bail!(
                "auth.session_lifetime_days must be between 1 and {}",
                MAX_SESSION_DAYS
            );
        }
        Ok(())
    }
}
