//! Message and transcript types for the chat session.
//!
//! Messages are created once and never mutated; the transcript preserves
//! insertion order, which is the only ordering guarantee the client makes.
//! Assistant content may contain markdown syntax — rendering it is the
//! embedding application's concern, not this crate's.

use std::fmt;

use derive_more::{Deref, IntoIterator};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message in the chat transcript.
///
/// # Examples
///
/// ```rust,ignore
/// use askdoc_core::types::{Message, MessageRole};
///
/// let question = Message::user("What is the summary?");
/// assert_eq!(question.role, MessageRole::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message. Version 7 UUIDs are time-ordered,
    /// so ids are monotonic within a session.
    pub id: Uuid,

    /// Role of the message sender.
    pub role: MessageRole,

    /// Text content of the message. May contain markdown syntax.
    pub content: String,

    /// Timestamp when this message was created. Informational only;
    /// transcript order is authoritative.
    pub created_at: Timestamp,
}

/// Role of a message participant in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the human user.
    User,

    /// Message from the answering service.
    Assistant,
}

impl Message {
    /// Creates a new message with the given role and content.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Returns true if this is a user message.
    pub fn is_user_message(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Returns true if this is an assistant message.
    pub fn is_assistant_message(&self) -> bool {
        self.role == MessageRole::Assistant
    }
}

/// The ordered sequence of messages in a session.
///
/// Append-only; messages keep their insertion order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, Deref, IntoIterator)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    /// Creates a new empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the transcript.
    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    /// Gets the last message in the transcript.
    pub fn last_message(&self) -> Option<&Message> {
        self.0.last()
    }

    /// Gets messages by role.
    pub fn messages_by_role(&self, role: MessageRole) -> Vec<&Message> {
        self.0.iter().filter(|m| m.role == role).collect()
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_monotonic() {
        let first = Message::user("one");
        let second = Message::assistant("two");
        assert!(first.id < second.id);
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Q1"));
        transcript.push(Message::assistant("A1"));

        assert_eq!(transcript.len(), 2);
        assert!(transcript[0].is_user_message());
        assert!(transcript[1].is_assistant_message());
        assert_eq!(transcript.last_message().unwrap().content, "A1");
    }

    #[test]
    fn test_messages_by_role() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("Q1"));
        transcript.push(Message::assistant("A1"));
        transcript.push(Message::user("Q2"));

        assert_eq!(transcript.messages_by_role(MessageRole::User).len(), 2);
        assert_eq!(transcript.messages_by_role(MessageRole::Assistant).len(), 1);
    }
}
