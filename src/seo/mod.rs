//! Search-engine facing output: per-page metadata, robots.txt and the
//! sitemap.

pub mod metadata;
pub mod robots;
pub mod sitemap;

pub use metadata::{localized_url, MetadataBuilder, Page, PageMetadata};
pub use robots::{RobotsPolicy, RobotsRule, PRIVATE_PREFIXES};
