use serde::{Deserialize, Serialize};

/// Canonical lead record derived from a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub event_question: String,
    /// Creation timestamp of the source session.
    pub timestamp: String,
}

impl ExtractedLead {
    /// Only complete leads are pushed or remembered.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.email.trim().is_empty()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Natural-language command asking the delivery channel to append this lead.
    pub fn render_instruction(&self, tool_name: &str) -> String {
        format!(
            "Use {} to save: firstName: {}, lastName: {}, email: {}, company: {}, jobTitle: {}, eventQuestion: {}, timestamp: {}",
            tool_name,
            self.first_name,
            self.last_name,
            self.email,
            self.company,
            self.job_title,
            self.event_question,
            self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead() -> ExtractedLead {
        ExtractedLead {
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            email: "ana@example.com".to_string(),
            company: "Acme".to_string(),
            job_title: "CTO".to_string(),
            event_question: "Hardest hire?".to_string(),
            timestamp: "2026-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_completeness_requires_first_name_and_email() {
        assert!(lead().is_complete());

        let mut no_email = lead();
        no_email.email = "  ".to_string();
        assert!(!no_email.is_complete());

        let mut no_name = lead();
        no_name.first_name.clear();
        assert!(!no_name.is_complete());

        let mut minimal = ExtractedLead::default();
        minimal.first_name = "Bo".to_string();
        minimal.email = "bo@x.io".to_string();
        assert!(minimal.is_complete());
    }

    #[test]
    fn test_render_instruction() {
        let rendered = lead().render_instruction("append_lead_row_v2");
        assert_eq!(
            rendered,
            "Use append_lead_row_v2 to save: firstName: Ana, lastName: Lopez, email: ana@example.com, \
             company: Acme, jobTitle: CTO, eventQuestion: Hardest hire?, timestamp: 2026-03-01T10:00:00Z"
        );
    }

    #[test]
    fn test_full_name_without_last_name() {
        let mut lead = lead();
        lead.last_name.clear();
        assert_eq!(lead.full_name(), "Ana");
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(lead()).unwrap();
        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["eventQuestion"], "Hardest hire?");
    }
}
