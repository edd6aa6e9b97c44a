use crate::config::{RobotsConfig, SiteConfig};
use serde::Serialize;
use std::fmt::Write;

/// Path prefixes that crawlers may never visit, whatever the configuration.
pub const PRIVATE_PREFIXES: &[&str] = &[
    "/api/",
    "/account/",
    "/notifications",
    "/sign-in",
    "/sign-out",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotsRule {
    pub user_agents: Vec<String>,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub crawl_delay: Option<u32>,
}

impl RobotsRule {
    fn applies_to(&self, agent: &str) -> bool {
        self.user_agents
            .iter()
            .any(|ua| ua != "*" && ua.eq_ignore_ascii_case(agent))
    }

    fn is_wildcard(&self) -> bool {
        self.user_agents.iter().any(|ua| ua == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotsPolicy {
    pub rules: Vec<RobotsRule>,
    pub sitemap: String,
}

impl RobotsPolicy {
    pub fn from_config(site: &SiteConfig, robots: &RobotsConfig) -> Self {
        let mut disallow: Vec<String> = PRIVATE_PREFIXES.iter().map(|p| p.to_string()).collect();
        for prefix in &robots.disallow {
            let prefix = prefix.trim();
            if !prefix.is_empty() && !disallow.iter().any(|p| p == prefix) {
                disallow.push(prefix.to_string());
            }
        }

        let mut rules = vec![RobotsRule {
            user_agents: vec!["*".to_string()],
            allow: vec!["/".to_string()],
            disallow: disallow.clone(),
            crawl_delay: None,
        }];

        let crawl_delay = (robots.crawl_delay > 0).then_some(robots.crawl_delay);
        for crawler in &robots.crawlers {
            let crawler = crawler.trim();
            if crawler.is_empty() || crawler == "*" {
                continue;
            }
            rules.push(RobotsRule {
                user_agents: vec![crawler.to_string()],
                allow: vec!["/".to_string()],
                disallow: disallow.clone(),
                crawl_delay,
            });
        }

        Self {
            rules,
            sitemap: format!("{}/sitemap.xml", site.base_url()),
        }
    }

    /// robots.txt body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            for ua in &rule.user_agents {
                let _ = writeln!(out, "User-agent: {}", ua);
            }
            for path in &rule.allow {
                let _ = writeln!(out, "Allow: {}", path);
            }
            for path in &rule.disallow {
                let _ = writeln!(out, "Disallow: {}", path);
            }
            if let Some(delay) = rule.crawl_delay {
                let _ = writeln!(out, "Crawl-delay: {}", delay);
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Sitemap: {}", self.sitemap);
        out
    }

    /// Whether `agent` may fetch `path` under this policy.
    ///
    /// The rule naming the agent wins over `*`. Within a rule the longest
    /// matching prefix decides, with `Allow` winning ties.
    pub fn is_allowed(&self, agent: &str, path: &str) -> bool {
        let rule = self
            .rules
            .iter()
            .find(|r| r.applies_to(agent))
            .or_else(|| self.rules.iter().find(|r| r.is_wildcard()));

        let Some(rule) = rule else {
            return true;
        };

        let longest = |prefixes: &[String]| {
            prefixes
                .iter()
                .filter(|p| path.starts_with(p.as_str()))
                .map(|p| p.len())
                .max()
        };

        match (longest(rule.allow.as_slice()), longest(rule.disallow.as_slice())) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(a), Some(d)) => a >= d,
        }
    }
}
