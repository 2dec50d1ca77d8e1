use crate::cli::parser::InspectArgs;
use crate::config::Config;
use crate::core::sync::{Assessment, SessionPreview, SyncEngine};
use crate::utils::Result;
use serde_json::json;

pub async fn execute(config: Config, args: InspectArgs) -> Result<()> {
    config.validate_for_network()?;

    let engine = SyncEngine::from_config(&config)?;
    let previews = engine.preview().await?;
    let shown: Vec<&SessionPreview> = previews
        .iter()
        .filter(|p| args.all || !matches!(p.assessment, Assessment::Skip(_)))
        .collect();

    if args.json {
        let rows: Vec<_> = shown.iter().map(|p| preview_json(p)).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No sessions to sync ({} fetched)", previews.len());
        return Ok(());
    }

    for preview in shown {
        println!("{}", format_preview(preview));
    }
    Ok(())
}

pub fn format_preview(preview: &SessionPreview) -> String {
    let detail = match &preview.assessment {
        Assessment::Ready(lead) => format!("READY       {} <{}>", lead.full_name(), lead.email),
        Assessment::Incomplete(gap) => format!("INCOMPLETE  {}", gap.as_str()),
        Assessment::Skip(reason) => format!("SKIP        {}", reason.as_str()),
    };
    format!("{}  {}  {}", preview.session_id, preview.created_at, detail)
}

fn preview_json(preview: &SessionPreview) -> serde_json::Value {
    let (status, detail) = match &preview.assessment {
        Assessment::Ready(lead) => ("ready", json!(lead)),
        Assessment::Incomplete(gap) => ("incomplete", json!(gap.as_str())),
        Assessment::Skip(reason) => ("skip", json!(reason.as_str())),
    };
    json!({
        "sessionId": preview.session_id,
        "createdAt": preview.created_at,
        "status": status,
        "detail": detail,
    })
}
