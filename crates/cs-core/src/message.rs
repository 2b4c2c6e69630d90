//! A chronological log of chat lines and notifications.
//!
//! The game world uses it for chat and combat narration; the website uses it
//! for success/error notifications.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who or what produced a message. Hosts use this to pick a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Typed by the player.
    Player,
    /// Game or bot narration.
    System,
    /// A combat log line.
    Combat,
    /// A website notification for a completed action.
    Success,
    /// A website notification for a failed action.
    Error,
    /// A neutral website notification.
    Info,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::System => write!(f, "system"),
            Self::Combat => write!(f, "combat"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single logged line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Category of the message.
    pub kind: MessageKind,
    /// Display text.
    pub text: String,
    /// When the message was logged.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded message history. Oldest messages are dropped first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<Message>,
    max_messages: usize,
    #[serde(default)]
    posted: u64,
}

impl MessageLog {
    /// Create a log holding at most `max_messages` lines (0 = unlimited).
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: Vec::new(),
            max_messages,
            posted: 0,
        }
    }

    /// Append a message, trimming the oldest if over capacity.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.posted += 1;
        if self.max_messages > 0 && self.messages.len() > self.max_messages {
            let excess = self.messages.len() - self.max_messages;
            self.messages.drain(..excess);
        }
    }

    /// Append a message of the given kind.
    pub fn post(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.push(Message::new(kind, text));
    }

    /// All retained messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages ever pushed, including trimmed ones. Not reset by [`clear`](Self::clear).
    pub fn posted(&self) -> u64 {
        self.posted
    }

    /// Retained messages pushed after [`posted`](Self::posted) returned `mark`.
    pub fn since(&self, mark: u64) -> &[Message] {
        let fresh = usize::try_from(self.posted.saturating_sub(mark)).unwrap_or(usize::MAX);
        let start = self.messages.len().saturating_sub(fresh);
        &self.messages[start..]
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Retained messages of one kind.
    pub fn of_kind(&self, kind: MessageKind) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.kind == kind).collect()
    }

    /// Whether any retained message has exactly this text.
    pub fn contains_text(&self, text: &str) -> bool {
        self.messages.iter().any(|m| m.text == text)
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
