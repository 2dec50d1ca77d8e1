//! One sync pass: fetch, filter, extract, push, remember.

use crate::config::Config;
use crate::core::client::{DeliverySink, SessionSource, VapiClient};
use crate::core::delivery::{LeadPusher, PushOutcome};
use crate::core::eligibility::{Eligibility, EligibilityFilter, SkipReason};
use crate::core::extract::{ExtractionGap, LeadExtractor};
use crate::core::lead::ExtractedLead;
use crate::core::session::Session;
use crate::core::store::{DeliveredStore, InFlightGuard, InMemoryDeliveredStore};
use crate::utils::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub fetched: usize,
    pub synced: usize,
    pub skipped: usize,
    pub incomplete: usize,
}

/// What a pass would do with a session, before any push.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    Skip(SkipReason),
    Incomplete(ExtractionGap),
    Ready(ExtractedLead),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionPreview {
    pub session_id: String,
    pub created_at: String,
    pub assessment: Assessment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionOutcome {
    Synced,
    Skipped,
    Incomplete,
    PushFailed,
}

pub struct SyncEngine {
    source: Arc<dyn SessionSource>,
    pusher: LeadPusher,
    extractor: LeadExtractor,
    filter: EligibilityFilter,
    delivered: Arc<dyn DeliveredStore>,
    in_flight: InFlightGuard,
}

impl SyncEngine {
    pub fn new(
        config: &Config,
        source: Arc<dyn SessionSource>,
        sink: Arc<dyn DeliverySink>,
        delivered: Arc<dyn DeliveredStore>,
    ) -> Self {
        Self {
            source,
            pusher: LeadPusher::new(sink, &config.delivery),
            extractor: LeadExtractor::from_config(&config.extraction),
            filter: EligibilityFilter::new(config.cutoff(), &config.delivery.success_marker),
            delivered,
            in_flight: InFlightGuard::new(),
        }
    }

    /// Engine talking to the live platform with a fresh, empty delivered set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(VapiClient::new(&config.api)?);
        Ok(Self::new(
            config,
            client.clone(),
            client,
            InMemoryDeliveredStore::shared(),
        ))
    }

    /// Runs one pass. Only a failed fetch aborts it; every per-session failure is
    /// logged and leaves the session eligible for the next pass.
    pub async fn run_pass(&self) -> Result<SyncReport> {
        info!(
            cutoff = self.filter.cutoff(),
            strategies = ?self.extractor.strategy_names(),
            "starting lead sync"
        );

        let sessions = self.source.fetch_sessions().await.map_err(|e| {
            error!(error = %e, "lead sync aborted");
            e
        })?;

        let mut report = SyncReport {
            fetched: sessions.len(),
            ..SyncReport::default()
        };

        for session in &sessions {
            match self.process(session).await {
                SessionOutcome::Synced => report.synced += 1,
                SessionOutcome::Skipped => report.skipped += 1,
                SessionOutcome::Incomplete => report.incomplete += 1,
                SessionOutcome::PushFailed => {}
            }
        }

        info!(
            synced = report.synced,
            skipped = report.skipped,
            incomplete = report.incomplete,
            "lead sync complete"
        );
        Ok(report)
    }

    /// Fetches and assesses every session without pushing or remembering anything.
    pub async fn preview(&self) -> Result<Vec<SessionPreview>> {
        let sessions = self.source.fetch_sessions().await?;
        Ok(sessions
            .iter()
            .map(|session| SessionPreview {
                session_id: session.id.clone(),
                created_at: session.created_at.clone(),
                assessment: self.assess(session),
            })
            .collect())
    }

    pub fn assess(&self, session: &Session) -> Assessment {
        if let Eligibility::Skip(reason) = self.filter.evaluate(session, self.delivered.as_ref()) {
            return Assessment::Skip(reason);
        }

        match self.extractor.extract(session) {
            Some(lead) => Assessment::Ready(lead),
            None => Assessment::Incomplete(self.extractor.classify_gap(session)),
        }
    }

    async fn process(&self, session: &Session) -> SessionOutcome {
        let lead = match self.assess(session) {
            Assessment::Skip(reason) => {
                debug!(session_id = %session.id, reason = reason.as_str(), "skipping session");
                return SessionOutcome::Skipped;
            }
            Assessment::Incomplete(gap) => {
                debug!(session_id = %session.id, gap = gap.as_str(), "no complete lead in session");
                return SessionOutcome::Incomplete;
            }
            Assessment::Ready(lead) => lead,
        };

        let Some(_claim) = self.in_flight.try_claim(&session.id) else {
            debug!(
                session_id = %session.id,
                reason = SkipReason::InFlight.as_str(),
                "skipping session"
            );
            return SessionOutcome::Skipped;
        };

        // A concurrent pass may have finished this session since it was assessed.
        if self.delivered.contains(&session.id) {
            debug!(
                session_id = %session.id,
                reason = SkipReason::AlreadyDelivered.as_str(),
                "skipping session"
            );
            return SessionOutcome::Skipped;
        }

        match self.pusher.push(&session.id, &lead).await {
            Ok(PushOutcome::Delivered) => {
                self.delivered.add(&session.id);
                info!(
                    session_id = %session.id,
                    name = %lead.full_name(),
                    email = %lead.email,
                    customer = ?session.customer_number(),
                    "pushed lead"
                );
                SessionOutcome::Synced
            }
            Ok(outcome) => {
                error!(
                    session_id = %session.id,
                    name = %lead.full_name(),
                    outcome = ?outcome,
                    "failed to push lead"
                );
                SessionOutcome::PushFailed
            }
            Err(e) => {
                warn!(
                    session_id = %session.id,
                    name = %lead.full_name(),
                    error = %e,
                    "failed to push lead, will retry next pass"
                );
                SessionOutcome::PushFailed
            }
        }
    }
}
