//! Builders and in-memory collaborators shared by unit tests.

pub mod sessions {
    use crate::core::lead::ExtractedLead;
    use crate::core::session::{Customer, FunctionCall, Message, Role, Session, ToolCall};

    pub const DEFAULT_CREATED_AT: &str = "2026-03-01T18:45:00.000Z";

    pub struct SessionBuilder {
        session: Session,
    }

    impl SessionBuilder {
        pub fn new(id: &str) -> Self {
            Self {
                session: Session {
                    id: id.to_string(),
                    status: Some("ended".to_string()),
                    created_at: DEFAULT_CREATED_AT.to_string(),
                    messages: Vec::new(),
                    customer: None,
                },
            }
        }

        pub fn created_at(mut self, created_at: &str) -> Self {
            self.session.created_at = created_at.to_string();
            self
        }

        pub fn customer(mut self, number: &str) -> Self {
            self.session.customer = Some(Customer {
                number: Some(number.to_string()),
            });
            self
        }

        pub fn user(self, text: &str) -> Self {
            self.message(text_message(Role::User, text))
        }

        pub fn message(mut self, message: Message) -> Self {
            self.session.messages.push(message);
            self
        }

        pub fn build(self) -> Session {
            self.session
        }
    }

    pub fn text_message(role: Role, text: &str) -> Message {
        Message {
            role,
            content: serde_json::Value::String(text.to_string()),
            tool_calls: Vec::new(),
        }
    }

    pub fn assistant(text: &str) -> Message {
        text_message(Role::Assistant, text)
    }

    pub fn tool_result(text: &str) -> Message {
        text_message(Role::Tool, text)
    }

    /// Assistant message carrying one tool invocation with JSON-text arguments.
    pub fn save_call(name: &str, arguments: &str) -> Message {
        tool_call(vec![(name, arguments)])
    }

    pub fn tool_call(calls: Vec<(&str, &str)>) -> Message {
        Message {
            role: Role::Assistant,
            content: serde_json::Value::Null,
            tool_calls: calls
                .into_iter()
                .map(|(name, arguments)| ToolCall {
                    function: FunctionCall {
                        name: name.to_string(),
                        arguments: serde_json::Value::String(arguments.to_string()),
                    },
                })
                .collect(),
        }
    }

    pub fn sample_lead(first_name: &str, email: &str) -> ExtractedLead {
        ExtractedLead {
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
            company: "Acme".to_string(),
            job_title: "Founder".to_string(),
            event_question: "What's next?".to_string(),
            timestamp: DEFAULT_CREATED_AT.to_string(),
        }
    }
}

pub mod fakes {
    use crate::core::client::{ChatOutput, ChatResponse, DeliverySink, SessionSource};
    use crate::core::session::Session;
    use crate::utils::{LeadSyncError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    pub struct FakeSource {
        sessions: Vec<Session>,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        pub fn new(sessions: Vec<Session>) -> Self {
            Self {
                sessions,
                fail: false,
                fetches: AtomicUsize::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(Vec::new())
            }
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SessionSource for FakeSource {
        async fn fetch_sessions(&self) -> Result<Vec<Session>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LeadSyncError::fetch_error("503 Service Unavailable"));
            }
            Ok(self.sessions.clone())
        }
    }

    /// Records every submission and answers with a fixed assistant reply.
    pub struct RecordingSink {
        reply: String,
        fail_when_contains: Option<String>,
        delay: Option<Duration>,
        submissions: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                fail_when_contains: None,
                delay: None,
                submissions: Mutex::new(Vec::new()),
            }
        }

        /// Every submission fails at the transport level.
        pub fn failing() -> Self {
            Self {
                fail_when_contains: Some(String::new()),
                ..Self::replying("")
            }
        }

        /// Fails submissions whose instruction mentions `needle`, answers the rest.
        pub fn failing_for(needle: &str, reply: &str) -> Self {
            Self {
                fail_when_contains: Some(needle.to_string()),
                ..Self::replying(reply)
            }
        }

        pub fn with_delay_ms(mut self, millis: u64) -> Self {
            self.delay = Some(Duration::from_millis(millis));
            self
        }

        pub fn submissions(&self) -> Vec<(String, String)> {
            self.submissions.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DeliverySink for RecordingSink {
        async fn submit(&self, channel_id: &str, instruction: &str) -> Result<ChatResponse> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(needle) = &self.fail_when_contains {
                if instruction.contains(needle.as_str()) {
                    return Err(LeadSyncError::delivery_error("connection reset by peer"));
                }
            }

            self.submissions
                .lock()
                .unwrap()
                .push((channel_id.to_string(), instruction.to_string()));

            Ok(ChatResponse {
                output: vec![ChatOutput {
                    role: "assistant".to_string(),
                    content: serde_json::Value::String(self.reply.clone()),
                }],
            })
        }
    }
}
