use crate::core::session::Session;
use crate::core::store::DeliveredStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BeforeCutoff,
    /// Pushed earlier by this process.
    AlreadyDelivered,
    /// A tool message in the session already reports a successful append.
    PriorDeliveryEvidence,
    /// Another pass is pushing this session right now.
    InFlight,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::BeforeCutoff => "before_cutoff",
            SkipReason::AlreadyDelivered => "already_delivered",
            SkipReason::PriorDeliveryEvidence => "prior_delivery_evidence",
            SkipReason::InFlight => "in_flight",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Skip(SkipReason),
}

pub struct EligibilityFilter {
    cutoff: String,
    delivery_marker: String,
}

impl EligibilityFilter {
    pub fn new(cutoff: impl Into<String>, delivery_marker: impl Into<String>) -> Self {
        Self {
            cutoff: cutoff.into(),
            delivery_marker: delivery_marker.into(),
        }
    }

    pub fn cutoff(&self) -> &str {
        &self.cutoff
    }

    /// Checks run cheapest first: cutoff, local memory, then message scan.
    pub fn evaluate(&self, session: &Session, delivered: &dyn DeliveredStore) -> Eligibility {
        if session.created_before(&self.cutoff) {
            return Eligibility::Skip(SkipReason::BeforeCutoff);
        }

        if delivered.contains(&session.id) {
            return Eligibility::Skip(SkipReason::AlreadyDelivered);
        }

        if session.has_delivery_evidence(&self.delivery_marker) {
            return Eligibility::Skip(SkipReason::PriorDeliveryEvidence);
        }

        Eligibility::Eligible
    }
}
