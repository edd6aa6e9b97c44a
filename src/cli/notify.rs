use crate::services::{auth, notifications};
use crate::{Config, Database};
use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path, username: &str, title: &str, body: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;
    db.migrate()?;

    let user = auth::get_user_by_username(&db, username)?
        .ok_or_else(|| anyhow::anyhow!("User '{}' not found", username))?;

    let id = notifications::create(&db, user.id, title, body)?;
    tracing::info!(notification_id = id, user_id = user.id, "Notification sent");

    Ok(())
}
