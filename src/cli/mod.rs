pub mod blog;
pub mod init;
pub mod migrate;
pub mod notify;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foodsave")]
#[command(version)]
#[command(about = "Localized FoodSave storefront server", long_about = None)]
pub struct Cli {
    #[arg(short, long, default_value = "foodsave.toml", env = "FOODSAVE_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter configuration and data directory
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// Run the web server
    Serve {
        /// Overrides `[server] host`
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Overrides `[server] port`
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Apply pending migrations, or show their status
    Migrate {
        #[arg(long)]
        status: bool,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    Blog {
        #[command(subcommand)]
        command: BlogCommand,
    },
    /// Send an in-app notification to a user
    Notify {
        #[arg(long)]
        username: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        body: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommand {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "customer")]
        role: String,
        #[arg(long)]
        password: Option<String>,
    },
    List,
    Remove {
        username: String,
    },
    Passwd {
        username: String,
    },
}

#[derive(Subcommand)]
pub enum BlogCommand {
    /// Publish a markdown file as a post in one locale
    Publish {
        #[arg(long)]
        title: String,
        #[arg(long)]
        locale: String,
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
    },
    List,
}
