use crate::config::DeliveryConfig;
use crate::core::client::{ChatResponse, DeliverySink};
use crate::core::lead::ExtractedLead;
use crate::utils::Result;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The channel reported the row as appended.
    Delivered,
    /// The channel answered but never confirmed the append.
    Unconfirmed,
    /// No delivery channel is configured; nothing was sent.
    ChannelMissing,
}

impl PushOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PushOutcome::Delivered)
    }
}

pub struct LeadPusher {
    sink: Arc<dyn DeliverySink>,
    channel_id: Option<String>,
    tool_name: String,
    success_marker: String,
}

impl LeadPusher {
    pub fn new(sink: Arc<dyn DeliverySink>, config: &DeliveryConfig) -> Self {
        Self {
            sink,
            channel_id: config
                .channel_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
            tool_name: config.tool_name.clone(),
            success_marker: config.success_marker.clone(),
        }
    }

    /// Transport faults are returned as errors; an unconfirmed answer is not an error.
    pub async fn push(&self, session_id: &str, lead: &ExtractedLead) -> Result<PushOutcome> {
        let Some(channel_id) = self.channel_id.as_deref() else {
            error!(
                session_id,
                "no delivery channel configured (set delivery.channel_id or VAPI_BACKFILL_SESSION_ID), cannot push leads"
            );
            return Ok(PushOutcome::ChannelMissing);
        };

        let instruction = lead.render_instruction(&self.tool_name);
        debug!(session_id, channel_id, "submitting lead to delivery channel");

        let response = self.sink.submit(channel_id, &instruction).await?;
        if self.is_confirmed(&response) {
            Ok(PushOutcome::Delivered)
        } else {
            Ok(PushOutcome::Unconfirmed)
        }
    }

    fn is_confirmed(&self, response: &ChatResponse) -> bool {
        response
            .output
            .iter()
            .filter_map(|entry| entry.text())
            .any(|text| {
                text.contains(&self.success_marker) || text.to_lowercase().contains("successfully")
            })
    }
}
