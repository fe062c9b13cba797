use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::code::{PshiftCode, ShiftType, Subgroup};
use crate::error::{ParshiftError, Result};
use crate::models::{
    AnnotatedTurn, Classification, FrequencyTable, SegmentStatistics, ShiftTypeShare,
    StatisticsRow,
};
use crate::propensity::compute_propensities;

pub const MAX_SEGMENTS: usize = 4;

/// What to do when a ratio's denominator is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDivisionPolicy {
    /// Report the ratio as `0.0`.
    #[default]
    Zero,
    /// Fail with `DivisionByZeroSubgroup`.
    Fail,
}

impl ZeroDivisionPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for ZeroDivisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZeroDivisionPolicy {
    type Err = ParshiftError;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(Self::Zero),
            "fail" | "error" => Ok(Self::Fail),
            other => Err(ParshiftError::Validation(format!(
                "zero-division policy must be 'zero' or 'fail', got '{other}'"
            ))),
        }
    }
}

#[must_use]
pub fn frequency_table(classifications: &[Classification]) -> FrequencyTable {
    FrequencyTable::from_codes(classifications.iter().filter_map(|c| c.code))
}

pub fn compute_statistics(classifications: &[Classification]) -> Result<Vec<StatisticsRow>> {
    compute_statistics_with(classifications, ZeroDivisionPolicy::default())
}

pub fn compute_statistics_with(
    classifications: &[Classification],
    policy: ZeroDivisionPolicy,
) -> Result<Vec<StatisticsRow>> {
    let table = frequency_table(classifications);
    debug!(
        classified = table.total(),
        a0 = table.count_a0,
        ab = table.count_ab,
        "computed frequency table"
    );
    statistics_from_table(&table, policy)
}

/// One row per code, in canonical display order.
pub fn statistics_from_table(
    table: &FrequencyTable,
    policy: ZeroDivisionPolicy,
) -> Result<Vec<StatisticsRow>> {
    let mut rows = Vec::with_capacity(PshiftCode::ALL.len());
    for code in PshiftCode::ALL {
        let frequency = table.frequency(code);
        let subgroup = code.subgroup();
        let probability = ratio(frequency, table.total(), "total", policy)?;
        let cp = ratio(
            frequency,
            table.subgroup_total(subgroup),
            subgroup_label(subgroup),
            policy,
        )?;
        let cpetc = if code.is_speaker_change() {
            Some(ratio(
                frequency,
                table.subgroup_noncontinuing_total(subgroup),
                subgroup_noncontinuing_label(subgroup),
                policy,
            )?)
        } else {
            None
        };
        rows.push(StatisticsRow {
            code,
            frequency,
            probability,
            cp,
            cpetc,
            is_speaker_change: code.is_speaker_change(),
            is_directed: code.is_directed(),
        });
    }
    Ok(rows)
}

/// Splits annotated turns into `segments` contiguous parts and computes
/// statistics and propensities for each. The first part keeps the code-less
/// opening turn.
pub fn segment_statistics(
    turns: &[AnnotatedTurn],
    segments: usize,
    policy: ZeroDivisionPolicy,
) -> Result<Vec<SegmentStatistics>> {
    if !(1..=MAX_SEGMENTS).contains(&segments) {
        return Err(ParshiftError::InvalidSegmentCount(segments));
    }
    let len = turns.len();
    let mut out = Vec::with_capacity(segments);
    for segment_index in 0..segments {
        let start_turn = len * segment_index / segments;
        let end_turn = len * (segment_index + 1) / segments;
        let classifications = turns[start_turn..end_turn]
            .iter()
            .map(|annotated| annotated.classification.clone())
            .collect::<Vec<_>>();
        let rows = compute_statistics_with(&classifications, policy)?;
        let propensities = compute_propensities(&rows)?;
        out.push(SegmentStatistics {
            segment_index,
            start_turn,
            end_turn,
            rows,
            propensities,
        });
    }
    Ok(out)
}

/// Frequency per shift type with its share of the total, zero groups dropped.
#[must_use]
pub fn shift_type_breakdown(rows: &[StatisticsRow]) -> Vec<ShiftTypeShare> {
    let total = rows.iter().map(|row| row.frequency).sum::<usize>();
    ShiftType::ALL
        .into_iter()
        .filter_map(|shift_type| {
            let frequency = rows
                .iter()
                .filter(|row| row.code.shift_type() == shift_type)
                .map(|row| row.frequency)
                .sum::<usize>();
            (frequency > 0).then(|| ShiftTypeShare {
                shift_type,
                frequency,
                percentage: round_to(100.0 * frequency as f64 / total as f64, 1),
            })
        })
        .collect()
}

fn ratio(
    numerator: usize,
    denominator: usize,
    label: &str,
    policy: ZeroDivisionPolicy,
) -> Result<f64> {
    if denominator == 0 {
        return match policy {
            ZeroDivisionPolicy::Zero => {
                warn!(denominator = label, "empty denominator reported as 0");
                Ok(0.0)
            }
            ZeroDivisionPolicy::Fail => Err(ParshiftError::DivisionByZeroSubgroup(label.to_string())),
        };
    }
    Ok(round_to(numerator as f64 / denominator as f64, 2))
}

const fn subgroup_label(subgroup: Subgroup) -> &'static str {
    match subgroup {
        Subgroup::Undirected => "A0",
        Subgroup::Directed => "AB",
    }
}

const fn subgroup_noncontinuing_label(subgroup: Subgroup) -> &'static str {
    match subgroup {
        Subgroup::Undirected => "A0 non-continuing",
        Subgroup::Directed => "AB non-continuing",
    }
}

// Exact ties go to the even neighbour: 1/8 becomes 0.12, 7/8 becomes 0.88.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}
