use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParshiftError, Result};

/// Gibson's participation-shift codes.
///
/// Declaration order is the canonical display order used by statistics tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PshiftCode {
    #[serde(rename = "A0-XA")]
    A0Xa,
    #[serde(rename = "A0-X0")]
    A0X0,
    #[serde(rename = "A0-XY")]
    A0Xy,
    #[serde(rename = "A0-AY")]
    A0Ay,
    #[serde(rename = "AB-BA")]
    AbBa,
    #[serde(rename = "AB-B0")]
    AbB0,
    #[serde(rename = "AB-X0")]
    AbX0,
    #[serde(rename = "AB-XA")]
    AbXa,
    #[serde(rename = "AB-XB")]
    AbXb,
    #[serde(rename = "AB-A0")]
    AbA0,
    #[serde(rename = "AB-BY")]
    AbBy,
    #[serde(rename = "AB-XY")]
    AbXy,
    #[serde(rename = "AB-AY")]
    AbAy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftType {
    #[serde(rename = "Turn Receiving")]
    TurnReceiving,
    #[serde(rename = "Turn Claiming")]
    TurnClaiming,
    #[serde(rename = "Turn Usurping")]
    TurnUsurping,
    #[serde(rename = "Turn Continuing")]
    TurnContinuing,
}

/// Whether the prior turn was addressed to the group (`A0`) or to someone (`AB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subgroup {
    Undirected,
    Directed,
}

impl PshiftCode {
    pub const ALL: [Self; 13] = [
        Self::A0Xa,
        Self::A0X0,
        Self::A0Xy,
        Self::A0Ay,
        Self::AbBa,
        Self::AbB0,
        Self::AbX0,
        Self::AbXa,
        Self::AbXb,
        Self::AbA0,
        Self::AbBy,
        Self::AbXy,
        Self::AbAy,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A0Xa => "A0-XA",
            Self::A0X0 => "A0-X0",
            Self::A0Xy => "A0-XY",
            Self::A0Ay => "A0-AY",
            Self::AbBa => "AB-BA",
            Self::AbB0 => "AB-B0",
            Self::AbX0 => "AB-X0",
            Self::AbXa => "AB-XA",
            Self::AbXb => "AB-XB",
            Self::AbA0 => "AB-A0",
            Self::AbBy => "AB-BY",
            Self::AbXy => "AB-XY",
            Self::AbAy => "AB-AY",
        }
    }

    #[must_use]
    pub const fn shift_type(self) -> ShiftType {
        match self {
            Self::AbBa | Self::AbB0 | Self::AbBy => ShiftType::TurnReceiving,
            Self::A0X0 | Self::A0Xa | Self::A0Xy => ShiftType::TurnClaiming,
            Self::AbX0 | Self::AbXa | Self::AbXb | Self::AbXy => ShiftType::TurnUsurping,
            Self::A0Ay | Self::AbA0 | Self::AbAy => ShiftType::TurnContinuing,
        }
    }

    #[must_use]
    pub const fn subgroup(self) -> Subgroup {
        match self {
            Self::A0Xa | Self::A0X0 | Self::A0Xy | Self::A0Ay => Subgroup::Undirected,
            _ => Subgroup::Directed,
        }
    }

    /// Position in the canonical display order.
    #[must_use]
    pub const fn display_position(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_speaker_change(self) -> bool {
        !matches!(self.shift_type(), ShiftType::TurnContinuing)
    }

    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self.subgroup(), Subgroup::Directed)
    }
}

impl fmt::Display for PshiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PshiftCode {
    type Err = ParshiftError;

    fn from_str(raw: &str) -> Result<Self> {
        if !is_well_formed(raw) {
            return Err(ParshiftError::InvalidCodeFormat(raw.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|code| code.label() == raw)
            .ok_or_else(|| ParshiftError::UnknownCode(raw.to_string()))
    }
}

// A[B0]-[ABX][ABXY0]
fn is_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 5
        && bytes[0] == b'A'
        && matches!(bytes[1], b'B' | b'0')
        && bytes[2] == b'-'
        && matches!(bytes[3], b'A' | b'B' | b'X')
        && matches!(bytes[4], b'A' | b'B' | b'X' | b'Y' | b'0')
}

impl ShiftType {
    pub const ALL: [Self; 4] = [
        Self::TurnReceiving,
        Self::TurnClaiming,
        Self::TurnUsurping,
        Self::TurnContinuing,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::TurnReceiving => "Turn Receiving",
            Self::TurnClaiming => "Turn Claiming",
            Self::TurnUsurping => "Turn Usurping",
            Self::TurnContinuing => "Turn Continuing",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shift type for a code given as text, e.g. `"AB-B0"`.
pub fn pshift_type(raw: &str) -> Result<ShiftType> {
    raw.parse::<PshiftCode>().map(PshiftCode::shift_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_its_label() {
        for code in PshiftCode::ALL {
            assert_eq!(code.label().parse::<PshiftCode>().expect("parse"), code);
        }
    }

    #[test]
    fn display_positions_follow_canonical_order() {
        let labels = PshiftCode::ALL.map(PshiftCode::label);
        assert_eq!(
            labels,
            [
                "A0-XA", "A0-X0", "A0-XY", "A0-AY", "AB-BA", "AB-B0", "AB-X0", "AB-XA", "AB-XB",
                "AB-A0", "AB-BY", "AB-XY", "AB-AY",
            ]
        );
        for (idx, code) in PshiftCode::ALL.into_iter().enumerate() {
            assert_eq!(code.display_position(), idx);
        }
    }

    #[test]
    fn shift_type_table_matches_coding_scheme() {
        let cases = [
            ("AB-BA", ShiftType::TurnReceiving),
            ("AB-B0", ShiftType::TurnReceiving),
            ("AB-BY", ShiftType::TurnReceiving),
            ("A0-X0", ShiftType::TurnClaiming),
            ("A0-XA", ShiftType::TurnClaiming),
            ("A0-XY", ShiftType::TurnClaiming),
            ("AB-X0", ShiftType::TurnUsurping),
            ("AB-XA", ShiftType::TurnUsurping),
            ("AB-XB", ShiftType::TurnUsurping),
            ("AB-XY", ShiftType::TurnUsurping),
            ("A0-AY", ShiftType::TurnContinuing),
            ("AB-A0", ShiftType::TurnContinuing),
            ("AB-AY", ShiftType::TurnContinuing),
        ];
        for (raw, expected) in cases {
            assert_eq!(pshift_type(raw).expect("known code"), expected, "{raw}");
        }
    }

    #[test]
    fn every_shift_type_is_reached() {
        for shift_type in ShiftType::ALL {
            assert!(
                PshiftCode::ALL
                    .iter()
                    .any(|code| code.shift_type() == shift_type),
                "{shift_type} has no code"
            );
        }
    }

    #[test]
    fn continuing_codes_are_the_only_non_speaker_changes() {
        let kept = PshiftCode::ALL
            .into_iter()
            .filter(|code| !code.is_speaker_change())
            .collect::<Vec<_>>();
        assert_eq!(kept, vec![PshiftCode::A0Ay, PshiftCode::AbA0, PshiftCode::AbAy]);
    }

    #[test]
    fn directed_codes_start_with_ab() {
        for code in PshiftCode::ALL {
            assert_eq!(code.is_directed(), code.label().starts_with("AB"));
        }
    }

    #[test]
    fn malformed_labels_are_rejected_as_format_errors() {
        for raw in ["hi", "", "AB-B", "AB-BYY", "B0-XA", "AX-XA", "A0XA0", "A0-Y0", "A0-XZ"] {
            assert!(
                matches!(
                    raw.parse::<PshiftCode>(),
                    Err(ParshiftError::InvalidCodeFormat(_))
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn well_formed_but_unlisted_labels_are_unknown() {
        for raw in ["A0-A0", "A0-AA", "AB-AB", "AB-BB", "AB-AA", "A0-BY"] {
            assert!(
                matches!(raw.parse::<PshiftCode>(), Err(ParshiftError::UnknownCode(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn codes_serialize_as_labels() {
        let value = serde_json::to_value(PshiftCode::AbXb).expect("serialize");
        assert_eq!(value, serde_json::json!("AB-XB"));
        let shift = serde_json::to_value(ShiftType::TurnUsurping).expect("serialize");
        assert_eq!(shift, serde_json::json!("Turn Usurping"));
    }
}
