pub mod commands;
pub mod parser;

#[cfg(test)]
mod tests;

pub use parser::{Cli, Commands};

use crate::config::{Config, ConfigManager};
use crate::utils::{LeadSyncError, Result};

pub async fn execute_command(cli: Cli) -> Result<()> {
    execute_command_with_config(cli, None).await
}

pub async fn execute_command_with_config(cli: Cli, test_config: Option<Config>) -> Result<()> {
    let config = match cli.command {
        Commands::Config(_) => None,
        _ => match test_config {
            Some(cfg) => Some(cfg),
            None => Some(
                ConfigManager::load_or_create_with_path(cli.config.as_deref()).map_err(|e| {
                    LeadSyncError::config_error(format!("Failed to load config: {}", e))
                })?,
            ),
        },
    };

    match (cli.command, config) {
        (Commands::Sync(args), Some(config)) => commands::sync::execute(config, args).await,
        (Commands::Watch(args), Some(config)) => {
            args.validate()?;
            commands::watch::execute(config, args).await
        }
        (Commands::Inspect(args), Some(config)) => commands::inspect::execute(config, args).await,
        (Commands::Config(args), _) => commands::config::execute(args, cli.config.as_deref()),
        (_, None) => Err(LeadSyncError::config_error("configuration not loaded")),
    }
}
