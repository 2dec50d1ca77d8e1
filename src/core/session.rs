//! Session records as returned by the assistant platform's session listing.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    /// ISO-8601 string, compared lexicographically against the sync cutoff.
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    #[serde(default)]
    pub number: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
    System,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    /// Plain text for most messages; multi-part arrays and objects are kept but never read as text.
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    /// Expected to be JSON text. Anything else is treated as unparseable.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl FunctionCall {
    pub fn arguments_text(&self) -> Option<&str> {
        self.arguments.as_str()
    }
}

impl Message {
    pub fn text(&self) -> Option<&str> {
        self.content.as_str().filter(|content| !content.is_empty())
    }
}

impl Session {
    pub fn created_before(&self, cutoff: &str) -> bool {
        self.created_at.as_str() < cutoff
    }

    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role == Role::User)
            .count()
    }

    pub fn messages_by(&self, role: Role) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(move |message| message.role == role)
    }

    pub fn tool_calls(&self) -> impl Iterator<Item = &ToolCall> {
        self.messages
            .iter()
            .flat_map(|message| message.tool_calls.iter())
    }

    /// True when a tool message already reports a successful append.
    pub fn has_delivery_evidence(&self, marker: &str) -> bool {
        self.messages_by(Role::Tool)
            .filter_map(Message::text)
            .any(|content| content.contains(marker))
    }

    pub fn customer_number(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.number.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
