use anyhow::Result;
use std::path::PathBuf;

pub async fn run(path: PathBuf, title: Option<String>) -> Result<()> {
    let site_title = title.unwrap_or_else(|| "FoodSave".to_string());
    let config_path = path.join("foodsave.toml");

    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(path.join("data"))?;
    std::fs::create_dir_all(path.join("static"))?;

    let config = format!(
        r#"[site]
title = "{}"
description = "Surplus food from local shops at a discount"
url = "http://localhost:3000"

[server]
host = "127.0.0.1"
port = 3000
request_timeout_secs = 30

[database]
path = "./data/foodsave.db"
pool_size = 8

[i18n]
default_locale = "ru"

[seo]
keywords = ["foodsave"]

[robots]
crawlers = ["Yandex", "Googlebot"]
crawl_delay = 2
disallow = []

[auth]
session_lifetime_days = 7
secure_cookies = false

[assets]
dir = "./static"
"#,
        site_title.replace('"', "\\\"")
    );

    std::fs::write(&config_path, config)?;

    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'foodsave migrate' to set up the database");
    tracing::info!("Run 'foodsave serve' to start the server");

    Ok(())
}
