//! Lead extraction: an ordered list of strategies, first complete lead wins.

pub mod strategies;

pub use strategies::{ExtractionStrategy, RecapStrategy, ToolCallStrategy};

use crate::config::ExtractionConfig;
use crate::core::lead::ExtractedLead;
use crate::core::session::Session;

/// Why no lead could be extracted from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionGap {
    /// Fewer user turns than a lead conversation needs.
    TooFewUserTurns,
    /// Enough conversation, but no structured call or recap carried the lead.
    /// No deeper inference is attempted for these sessions.
    NoLeadEvidence,
}

impl ExtractionGap {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionGap::TooFewUserTurns => "too_few_user_turns",
            ExtractionGap::NoLeadEvidence => "no_lead_evidence",
        }
    }
}

pub struct LeadExtractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    min_user_turns: usize,
}

impl LeadExtractor {
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>, min_user_turns: usize) -> Self {
        Self {
            strategies,
            min_user_turns,
        }
    }

    /// Structured tool calls first, assistant recap second.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            vec![
                Box::new(ToolCallStrategy::from_config(config)),
                Box::new(RecapStrategy),
            ],
            config.min_user_turns,
        )
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Returns a complete lead or `None`. Never fails on malformed input.
    pub fn extract(&self, session: &Session) -> Option<ExtractedLead> {
        self.strategies.iter().find_map(|strategy| {
            let lead = strategy.extract(session).filter(ExtractedLead::is_complete)?;
            tracing::debug!(
                session_id = %session.id,
                strategy = strategy.name(),
                "extracted lead"
            );
            Some(lead)
        })
    }

    /// Classifies a session for which `extract` returned `None`.
    pub fn classify_gap(&self, session: &Session) -> ExtractionGap {
        if session.user_turns() < self.min_user_turns {
            ExtractionGap::TooFewUserTurns
        } else {
            ExtractionGap::NoLeadEvidence
        }
    }
}
