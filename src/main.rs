use clap::Parser;
use foodsave::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foodsave=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { path, title }) => {
            foodsave::cli::init::run(path, title).await?;
        }
        Some(Commands::Serve { host, port }) => {
            foodsave::cli::serve::run(&cli.config, host, port).await?;
        }
        Some(Commands::Migrate { status }) => {
            foodsave::cli::migrate::run(&cli.config, status).await?;
        }
        Some(Commands::User { command }) => {
            foodsave::cli::user::run(&cli.config, command).await?;
        }
        Some(Commands::Blog { command }) => {
            foodsave::cli::blog::run(&cli.config, command).await?;
        }
        Some(Commands::Notify {
            username,
            title,
            body,
        }) => {
            foodsave::cli::notify::run(&cli.config, &username, &title, &body).await?;
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
