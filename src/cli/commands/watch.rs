use crate::cli::parser::WatchArgs;
use crate::config::Config;
use crate::core::scheduler::SyncScheduler;
use crate::core::sync::SyncEngine;
use crate::utils::{LeadSyncError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub async fn execute(mut config: Config, args: WatchArgs) -> Result<()> {
    config.validate_for_network()?;

    if let Some(interval) = args.interval {
        config.sync.interval_secs = interval;
    }
    if let Some(delay) = args.initial_delay {
        config.sync.initial_delay_secs = delay;
    }

    if !config.is_scheduling_enabled() {
        return Err(LeadSyncError::config_error(
            "scheduled sync disabled: set a non-zero sync interval and a delivery channel (VAPI_BACKFILL_SESSION_ID)",
        ));
    }

    let engine = Arc::new(SyncEngine::from_config(&config)?);
    let scheduler = SyncScheduler::new(
        engine,
        Duration::from_secs(config.sync.interval_secs),
        Duration::from_secs(config.sync.initial_delay_secs),
    )?;

    println!(
        "Syncing every {}s (first pass in {}s). Press Ctrl+C to stop.",
        config.sync.interval_secs, config.sync.initial_delay_secs
    );

    let passes = scheduler
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        })
        .await;

    info!(passes, "stopped");
    Ok(())
}
