use crate::models::UserRole;
use crate::{services::auth, Config, Database};
use anyhow::Result;
use std::path::Path;

use super::UserCommand;

fn prompt_new_password(label: &str) -> Result<String> {
    let password = rpassword::prompt_password(label)?;
    let confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}

pub async fn run(config_path: &Path, command: UserCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;
    db.migrate()?;

    match command {
        UserCommand::Add {
            username,
            email,
            role,
            password,
        } => {
            let role: UserRole = role.parse().map_err(|_| {
                anyhow::anyhow!("Invalid role '{}': expected admin, partner or customer", role)
            })?;
            let password = match password {
                Some(p) => p,
                None => prompt_new_password("Password: ")?,
            };

            let id = auth::create_user(&db, &username, &email, &password, role)?;
            tracing::info!(user_id = id, "User '{}' created as {}", username, role);
        }
        UserCommand::List => {
            let users = auth::list_users(&db)?;

            println!("{:<20} {:<30} {:<10} {}", "USERNAME", "EMAIL", "ROLE", "CREATED");
            println!("{}", "-".repeat(80));
            for user in users {
                println!(
                    "{:<20} {:<30} {:<10} {}",
                    user.username,
                    user.email,
                    user.role.to_string(),
                    user.created_at
                );
            }
        }
        UserCommand::Remove { username } => {
            if auth::delete_user(&db, &username)? {
                tracing::info!("User '{}' removed", username);
            } else {
                tracing::warn!("User '{}' not found", username);
            }
        }
        UserCommand::Passwd { username } => {
            let password = prompt_new_password("New password: ")?;
            auth::update_password(&db, &username, &password)?;
            tracing::info!("Password updated for '{}'", username);
        }
    }

    Ok(())
}
