use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParshiftError, Result};

use super::turn::GROUP_ADDRESSEE;

/// How messages in one conversation name their addressee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    /// Each message may reference the id of an earlier message.
    Reply,
    /// Each message may name the speaker it is addressed to.
    Target,
}

impl AddressingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressingMode {
    type Err = ParshiftError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "reply" => Ok(Self::Reply),
            "target" => Ok(Self::Target),
            other => Err(ParshiftError::MalformedAddressing(format!(
                "unrecognized addressing mode '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Addressing {
    None,
    Reply(i64),
    Target(String),
}

impl Addressing {
    /// Builds a target addressing, folding blank and null-like identifiers into `None`.
    #[must_use]
    pub fn target(raw: &str) -> Self {
        if is_blank_identifier(raw) {
            Self::None
        } else {
            Self::Target(raw.trim().to_string())
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Reply(_) => false,
            Self::Target(raw) => is_blank_identifier(raw),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<AddressingMode> {
        if self.is_none() {
            return None;
        }
        match self {
            Self::Reply(_) => Some(AddressingMode::Reply),
            Self::Target(_) => Some(AddressingMode::Target),
            Self::None => None,
        }
    }

    #[must_use]
    pub const fn reply_id(&self) -> Option<i64> {
        match self {
            Self::Reply(id) => Some(*id),
            _ => None,
        }
    }

    /// Target identifier, trimmed; `None` when the addressing is not a usable target.
    #[must_use]
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Self::Target(raw) if !is_blank_identifier(raw) => Some(raw.trim()),
            _ => None,
        }
    }

    /// Equality over normalized values: every "no target" spelling compares equal.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        if self.is_none() || other.is_none() {
            return self.is_none() && other.is_none();
        }
        match (self, other) {
            (Self::Reply(left), Self::Reply(right)) => left == right,
            (Self::Target(left), Self::Target(right)) => left.trim() == right.trim(),
            _ => false,
        }
    }
}

pub(crate) fn is_blank_identifier(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "None" || trimmed == "null"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub speaker: String,
    pub text: String,
    pub addressing: Addressing,
}

impl Message {
    pub fn new(
        id: i64,
        speaker: impl Into<String>,
        text: impl Into<String>,
        addressing: Addressing,
    ) -> Self {
        Self {
            id,
            speaker: speaker.into(),
            text: text.into(),
            addressing,
        }
    }
}

/// Ordered message log with a single addressing mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    mode: AddressingMode,
    messages: Vec<Message>,
}

impl Conversation {
    /// Infers the addressing mode from the messages. A log without any
    /// addressing is treated as target mode.
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        let mode = infer_mode(&messages)?.unwrap_or(AddressingMode::Target);
        Self::with_mode(mode, messages)
    }

    pub fn with_mode(mode: AddressingMode, messages: Vec<Message>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(messages.len());
        for message in &messages {
            let found = message.addressing.mode();
            if let Some(found) = found.filter(|found| *found != mode) {
                return Err(ParshiftError::MalformedAddressing(format!(
                    "message {} uses {found} addressing in a {mode} conversation",
                    message.id
                )));
            }
            if message.speaker.trim() == GROUP_ADDRESSEE
                || message.addressing.target_id() == Some(GROUP_ADDRESSEE)
            {
                return Err(ParshiftError::MalformedAddressing(format!(
                    "message {}: '{GROUP_ADDRESSEE}' is reserved for the whole group",
                    message.id
                )));
            }
            if !seen.insert(message.id) {
                return Err(ParshiftError::MalformedAddressing(format!(
                    "duplicate message id {}",
                    message.id
                )));
            }
        }
        Ok(Self { mode, messages })
    }

    #[must_use]
    pub const fn mode(&self) -> AddressingMode {
        self.mode
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn infer_mode(messages: &[Message]) -> Result<Option<AddressingMode>> {
    let mut inferred = None::<AddressingMode>;
    for message in messages {
        let Some(mode) = message.addressing.mode() else {
            continue;
        };
        match inferred {
            None => inferred = Some(mode),
            Some(existing) if existing != mode => {
                return Err(ParshiftError::MalformedAddressing(format!(
                    "conversation mixes {existing} and {mode} addressing (message {})",
                    message.id
                )));
            }
            Some(_) => {}
        }
    }
    Ok(inferred)
}
