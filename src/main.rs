//! chatsweep - Chat store inventory and cleanup CLI
//!
#![doc = "chatsweep - Chat store inventory and cleanup CLI"]
#![doc = "Main entry point for the chatsweep application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatsweep::cli::{Cli, Commands};
use chatsweep::commands;
use chatsweep::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Scan { json } => {
            tracing::info!("Starting store scan");
            commands::scan::run_scan(config, json).await?;
            Ok(())
        }
        Commands::Show { id, json } => {
            tracing::info!("Showing chat: {}", id);
            commands::show::run_show(config, &id, json).await?;
            Ok(())
        }
        Commands::DeleteChat { id, yes } => {
            tracing::info!("Deleting chat: {}", id);
            commands::delete::run_delete_chat(config, &id, yes).await?;
            Ok(())
        }
        Commands::DeleteAttachment {
            id,
            message,
            part,
            yes,
        } => {
            tracing::info!(
                "Deleting attachment at message {} part {} of chat: {}",
                message,
                part,
                id
            );
            commands::delete::run_delete_attachment(config, &id, message, part, yes).await?;
            Ok(())
        }
        Commands::Import { file } => {
            tracing::info!("Importing records from: {}", file.display());
            commands::import::run_import(config, &file).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "chatsweep=debug"
    } else {
        "chatsweep=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
