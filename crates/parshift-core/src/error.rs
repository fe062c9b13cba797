use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, ParshiftError>;

#[derive(Debug, Error)]
pub enum ParshiftError {
    #[error("malformed addressing: {0}")]
    MalformedAddressing(String),

    #[error("unresolvable reply chain: turn {turn_index} references message {reply_id}")]
    UnresolvableReplyChain { turn_index: usize, reply_id: i64 },

    #[error("invalid participation shift code format: {0}")]
    InvalidCodeFormat(String),

    #[error("unknown participation shift code: {0}")]
    UnknownCode(String),

    #[error("missing statistic: {0}")]
    MissingStatistic(String),

    #[error("division by zero in {0} subgroup")]
    DivisionByZeroSubgroup(String),

    #[error("segment count must be within 1..=4, got {0}")]
    InvalidSegmentCount(usize),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ParshiftError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedAddressing(_) => "MALFORMED_ADDRESSING",
            Self::UnresolvableReplyChain { .. } => "UNRESOLVABLE_REPLY_CHAIN",
            Self::InvalidCodeFormat(_) => "INVALID_CODE_FORMAT",
            Self::UnknownCode(_) => "UNKNOWN_CODE",
            Self::MissingStatistic(_) => "MISSING_STATISTIC",
            Self::DivisionByZeroSubgroup(_) => "DIVISION_BY_ZERO_SUBGROUP",
            Self::InvalidSegmentCount(_) => "INVALID_SEGMENT_COUNT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    pub fn to_payload(&self, operation: impl Into<String>) -> ErrorPayload {
        let details = match self {
            Self::UnresolvableReplyChain {
                turn_index,
                reply_id,
            } => Some(serde_json::json!({
                "turn_index": turn_index,
                "reply_id": reply_id,
            })),
            _ => None,
        };
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_carries_reply_chain_details() {
        let err = ParshiftError::UnresolvableReplyChain {
            turn_index: 3,
            reply_id: 42,
        };
        let payload = err.to_payload("annotate");
        assert_eq!(payload.code, "UNRESOLVABLE_REPLY_CHAIN");
        assert_eq!(payload.operation, "annotate");
        let details = payload.details.expect("details");
        assert_eq!(details["turn_index"], 3);
        assert_eq!(details["reply_id"], 42);
        Uuid::parse_str(&payload.trace_id).expect("trace_id must be a UUID");
    }

    #[test]
    fn payload_omits_details_for_plain_variants() {
        let payload = ParshiftError::UnknownCode("A0-A0".to_string()).to_payload("annotate");
        let value = serde_json::to_value(payload).expect("serialize");
        assert!(value.get("details").is_none());
        assert_eq!(value["message"], "unknown participation shift code: A0-A0");
    }
}
