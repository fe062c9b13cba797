use std::fmt;

use serde::{Serialize, Serializer};

use crate::code::{PshiftCode, ShiftType};

use super::conversation::{Addressing, Message};

/// Adjacent messages from one speaker to one addressee, folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub member_ids: Vec<i64>,
    pub speaker: String,
    pub text: String,
    pub addressing: Addressing,
}

impl Turn {
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        Self {
            member_ids: vec![message.id],
            speaker: message.speaker.clone(),
            text: message.text.clone(),
            addressing: message.addressing.clone(),
        }
    }

    #[must_use]
    pub fn accepts(&self, message: &Message) -> bool {
        self.speaker == message.speaker && self.addressing.matches(&message.addressing)
    }

    pub(crate) fn absorb(&mut self, message: &Message) {
        self.member_ids.push(message.id);
        self.text.push_str(". ");
        self.text.push_str(&message.text);
        self.addressing = message.addressing.clone();
    }

    #[must_use]
    pub const fn reply_id(&self) -> Option<i64> {
        self.addressing.reply_id()
    }
}

/// Wire spelling of [`Addressee::Group`]; reserved, so no speaker may use it.
pub const GROUP_ADDRESSEE: &str = "group";

/// Who a turn is addressed to, after resolving reply links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Addressee {
    Group,
    Speaker(String),
}

impl Addressee {
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group)
    }

    #[must_use]
    pub fn is_speaker(&self, speaker: &str) -> bool {
        matches!(self, Self::Speaker(id) if id == speaker)
    }
}

impl fmt::Display for Addressee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str(GROUP_ADDRESSEE),
            Self::Speaker(id) => f.write_str(id),
        }
    }
}

impl Serialize for Addressee {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub turn_index: usize,
    /// `None` for the first turn of a conversation.
    pub code: Option<PshiftCode>,
    pub prev_speaker: Option<String>,
    pub prev_target: Option<Addressee>,
    pub speaker: String,
    pub target: Addressee,
}

impl Classification {
    #[must_use]
    pub fn shift_type(&self) -> Option<ShiftType> {
        self.code.map(PshiftCode::shift_type)
    }

    /// Human-readable participation label, e.g. `"10 to group, 11 to 10"`.
    #[must_use]
    pub fn label(&self) -> String {
        let current = format!("{} to {}", self.speaker, self.target);
        match (&self.prev_speaker, &self.prev_target) {
            (Some(speaker), Some(target)) => format!("{speaker} to {target}, {current}"),
            _ => current,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedTurn {
    pub turn: Turn,
    pub classification: Classification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absorb_joins_text_and_ids() {
        let first = Message::new(1, "13", "hello", Addressing::Target("2".to_string()));
        let second = Message::new(2, "13", "again", Addressing::Target("2".to_string()));
        let mut turn = Turn::from_message(&first);
        assert!(turn.accepts(&second));
        turn.absorb(&second);
        assert_eq!(turn.member_ids, vec![1, 2]);
        assert_eq!(turn.text, "hello. again");
    }

    #[test]
    fn accepts_rejects_other_speaker_or_addressee() {
        let turn = Turn::from_message(&Message::new(1, "13", "a", Addressing::None));
        assert!(!turn.accepts(&Message::new(2, "14", "b", Addressing::None)));
        assert!(!turn.accepts(&Message::new(2, "13", "b", Addressing::Target("9".to_string()))));
        assert!(turn.accepts(&Message::new(2, "13", "b", Addressing::Target(String::new()))));
    }

    #[test]
    fn addressee_serializes_as_plain_identifier() {
        assert_eq!(
            serde_json::to_value(Addressee::Group).expect("serialize"),
            serde_json::json!("group")
        );
        assert_eq!(
            serde_json::to_value(Addressee::Speaker("11".to_string())).expect("serialize"),
            serde_json::json!("11")
        );
    }

    #[test]
    fn label_includes_previous_pair_when_resolved() {
        let classification = Classification {
            turn_index: 1,
            code: Some(PshiftCode::A0Xa),
            prev_speaker: Some("10".to_string()),
            prev_target: Some(Addressee::Group),
            speaker: "11".to_string(),
            target: Addressee::Speaker("10".to_string()),
        };
        assert_eq!(classification.label(), "10 to group, 11 to 10");
        assert_eq!(classification.shift_type(), Some(ShiftType::TurnClaiming));
    }
}
