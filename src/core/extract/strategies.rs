use crate::config::ExtractionConfig;
use crate::core::lead::ExtractedLead;
use crate::core::session::{Role, Session};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// One way of deriving a lead from a session. Strategies are pure and never fail:
/// anything unusable is simply `None`.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, session: &Session) -> Option<ExtractedLead>;
}

/// Reads the arguments of the assistant's own save/append tool invocations.
pub struct ToolCallStrategy {
    save_function: String,
    append_prefix: String,
}

impl ToolCallStrategy {
    pub fn new(save_function: impl Into<String>, append_prefix: impl Into<String>) -> Self {
        Self {
            save_function: save_function.into(),
            append_prefix: append_prefix.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(&config.save_function, &config.append_function_prefix)
    }

    fn is_lead_function(&self, name: &str) -> bool {
        name == self.save_function || name.starts_with(&self.append_prefix)
    }
}

impl ExtractionStrategy for ToolCallStrategy {
    fn name(&self) -> &'static str {
        "tool-call"
    }

    fn extract(&self, session: &Session) -> Option<ExtractedLead> {
        session
            .tool_calls()
            .filter(|call| self.is_lead_function(&call.function.name))
            .filter_map(|call| call.function.arguments_text())
            .filter_map(parse_arguments)
            .filter_map(|args| lead_from_arguments(&args, &session.created_at))
            .find(ExtractedLead::is_complete)
    }
}

fn parse_arguments(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn string_arg<'a>(args: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}

fn lead_from_arguments(args: &Map<String, Value>, timestamp: &str) -> Option<ExtractedLead> {
    let first_name = string_arg(args, "firstName")?;
    let email = string_arg(args, "email")?;
    let field = |key: &str| string_arg(args, key).unwrap_or_default().to_string();

    Some(ExtractedLead {
        first_name: first_name.to_string(),
        last_name: field("lastName"),
        email: email.to_string(),
        company: field("company"),
        job_title: field("jobTitle"),
        event_question: string_arg(args, "eventQuestion")
            .or_else(|| string_arg(args, "eventQuestions"))
            .unwrap_or_default()
            .to_string(),
        timestamp: timestamp.to_string(),
    })
}

/// Parses the labelled summary the assistant reads back before saving.
pub struct RecapStrategy;

struct RecapPatterns {
    email: Regex,
    name: Regex,
    company: Regex,
    role: Regex,
    question: Regex,
}

fn recap_patterns() -> &'static RecapPatterns {
    static PATTERNS: OnceLock<RecapPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let labelled = |label: &str| {
            Regex::new(&format!(r"(?i){}:\s*([^\r\n]+)", label)).expect("valid recap pattern")
        };
        RecapPatterns {
            email: Regex::new(r"(?i)Email:\s*(\S+@\S+)").expect("valid recap pattern"),
            name: labelled("Name"),
            company: labelled("Company"),
            role: labelled("Role"),
            question: labelled("Question"),
        }
    })
}

fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

pub fn parse_recap(text: &str, timestamp: &str) -> Option<ExtractedLead> {
    let patterns = recap_patterns();
    let email = capture(&patterns.email, text)?;
    let name = capture(&patterns.name, text)?;

    let mut name_parts = name.split_whitespace();
    let first_name = name_parts.next().unwrap_or_default().to_string();
    let last_name = name_parts.collect::<Vec<_>>().join(" ");
    let optional = |pattern: &Regex| capture(pattern, text).unwrap_or_default().to_string();

    Some(ExtractedLead {
        first_name,
        last_name,
        email: email.strip_suffix(',').unwrap_or(email).to_string(),
        company: optional(&patterns.company),
        job_title: optional(&patterns.role),
        event_question: optional(&patterns.question),
        timestamp: timestamp.to_string(),
    })
}

impl ExtractionStrategy for RecapStrategy {
    fn name(&self) -> &'static str {
        "recap"
    }

    fn extract(&self, session: &Session) -> Option<ExtractedLead> {
        session
            .messages_by(Role::Assistant)
            .filter_map(|message| message.text())
            .filter_map(|text| parse_recap(text, &session.created_at))
            .find(ExtractedLead::is_complete)
    }
}
