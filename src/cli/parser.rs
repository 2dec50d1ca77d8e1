use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "leadsync")]
#[command(about = "Sync leads captured by voice/SMS assistant sessions into a spreadsheet")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "LEADSYNC_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single sync pass and report the counters
    Sync(SyncArgs),
    /// Run sync passes on a timer until interrupted
    Watch(WatchArgs),
    /// Show what a sync pass would push, without pushing anything
    #[command(alias = "dry-run")]
    Inspect(InspectArgs),
    /// Show or initialize configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Print the pass report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between passes (overrides configuration)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Seconds before the first pass (overrides configuration)
    #[arg(long)]
    pub initial_delay: Option<u64>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Also list sessions that would be skipped
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Print the preview as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show current configuration (secrets redacted)
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file if none exists
    Init,
}

impl WatchArgs {
    pub fn validate(&self) -> crate::utils::Result<()> {
        if self.interval == Some(0) {
            return Err(crate::utils::LeadSyncError::invalid_args(
                "--interval must be greater than zero",
            ));
        }
        Ok(())
    }
}
