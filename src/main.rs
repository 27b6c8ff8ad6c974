//! mirrorcheck CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mirrorcheck::cli::{Cli, Commands};
use mirrorcheck::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    // Tokens (and optionally RUST_LOG) may live in a .env file.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(err) => mirrorcheck::cli::handle_error(err),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Issue { identifier } => {
            mirrorcheck::cli::commands::issue::execute(identifier, config).await
        }
        Commands::Team { selector, show_all, stop_after, export } => {
            mirrorcheck::cli::commands::team::execute(
                selector, show_all, stop_after, export, config,
            )
            .await
        }
    };

    if let Err(err) = result {
        mirrorcheck::cli::handle_error(err);
    }
}
