use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParshiftError, Result};
use crate::models::{Addressing, AddressingMode, Conversation, Message, is_blank_identifier};

/// One row of a conversation file.
///
/// A file uses either `reply_id` or `target_id`; identifiers may be written
/// as JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub id: i64,
    pub user_id: Identifier,
    pub message_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Integer(i64),
    Float(f64),
    Text(String),
}

const I64_FLOOR: f64 = i64::MIN as f64;
const I64_CEILING: f64 = -(i64::MIN as f64);

impl Identifier {
    /// Textual form; integral floats print without a fractional part.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) if value.fract() == 0.0 => format!("{value:.0}"),
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value.trim().to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(value) => is_blank_identifier(value),
            Self::Float(value) => value.is_nan(),
            Self::Integer(_) => false,
        }
    }

    fn as_message_id(&self, message_id: i64) -> Result<i64> {
        let invalid = || {
            ParshiftError::Validation(format!(
                "message {message_id}: reply_id '{}' is not a message id",
                self.to_text()
            ))
        };
        match self {
            Self::Integer(value) => Ok(*value),
            // `i64::MIN` is exactly representable; `i64::MAX` rounds up to 2^63.
            Self::Float(value)
                if value.fract() == 0.0 && (I64_FLOOR..I64_CEILING).contains(value) =>
            {
                Ok(*value as i64)
            }
            Self::Float(_) => Err(invalid()),
            Self::Text(value) => value.trim().parse::<i64>().map_err(|_| invalid()),
        }
    }
}

impl ConversationRecord {
    pub fn into_message(self) -> Result<Message> {
        let reply = self.reply_id.filter(|value| !value.is_blank());
        let target = self.target_id.filter(|value| !value.is_blank());
        let addressing = match (reply, target) {
            (Some(_), Some(_)) => {
                return Err(ParshiftError::MalformedAddressing(format!(
                    "message {} sets both reply_id and target_id",
                    self.id
                )));
            }
            (Some(reply), None) => Addressing::Reply(reply.as_message_id(self.id)?),
            (None, Some(target)) => Addressing::target(&target.to_text()),
            (None, None) => Addressing::None,
        };
        Ok(Message::new(
            self.id,
            self.user_id.to_text(),
            self.message_text,
            addressing,
        ))
    }
}

/// Parses a conversation from a JSON array or JSON Lines text.
///
/// `mode` forces the addressing mode; when absent it is inferred from the rows.
pub fn parse_conversation(
    raw: &str,
    mode: Option<AddressingMode>,
    source: Option<&str>,
) -> Result<Conversation> {
    let records = if raw.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<ConversationRecord>>(raw)?
    } else {
        read_json_lines(raw, source)?
    };

    let messages = records
        .into_iter()
        .map(ConversationRecord::into_message)
        .collect::<Result<Vec<_>>>()?;
    let conversation = match mode {
        Some(mode) => Conversation::with_mode(mode, messages)?,
        None => Conversation::new(messages)?,
    };
    debug!(
        source = source.unwrap_or("<inline>"),
        messages = conversation.len(),
        mode = %conversation.mode(),
        "loaded conversation"
    );
    Ok(conversation)
}

/// One record per non-blank line; stops at the first line that does not parse.
fn read_json_lines(raw: &str, source: Option<&str>) -> Result<Vec<ConversationRecord>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<ConversationRecord>(line).map_err(|err| {
                let location = source.map(|path| format!(" in {path}")).unwrap_or_default();
                ParshiftError::Validation(format!(
                    "invalid conversation record{location} at line {}: {err}",
                    idx + 1
                ))
            })
        })
        .collect()
}

pub fn load_conversation(path: &Path, mode: Option<AddressingMode>) -> Result<Conversation> {
    let raw = fs::read_to_string(path)?;
    let source = path.display().to_string();
    parse_conversation(&raw, mode, Some(&source))
}
