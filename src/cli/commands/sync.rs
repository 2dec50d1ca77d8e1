use crate::cli::parser::SyncArgs;
use crate::config::Config;
use crate::core::sync::{SyncEngine, SyncReport};
use crate::utils::Result;

pub async fn execute(config: Config, args: SyncArgs) -> Result<()> {
    config.validate_for_network()?;

    let engine = SyncEngine::from_config(&config)?;
    let report = engine.run_pass().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format_report(&report));
    }
    Ok(())
}

pub fn format_report(report: &SyncReport) -> String {
    format!(
        "Sync complete: {} pushed, {} already synced, {} incomplete ({} sessions fetched)",
        report.synced, report.skipped, report.incomplete, report.fetched
    )
}
