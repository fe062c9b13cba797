use chrono::{DateTime, Utc};
use serde::Serialize;

use super::conversation::AddressingMode;
use super::statistics::{Propensities, SegmentStatistics, ShiftTypeShare, StatisticsRow};
use super::turn::AnnotatedTurn;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatisticsSection {
    Whole(Vec<StatisticsRow>),
    Segmented(Vec<SegmentStatistics>),
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub mode: AddressingMode,
    pub message_count: usize,
    pub turn_count: usize,
    pub turns: Vec<AnnotatedTurn>,
    pub statistics: StatisticsSection,
    /// Always computed over the whole conversation.
    pub propensities: Propensities,
    pub shift_types: Vec<ShiftTypeShare>,
}
