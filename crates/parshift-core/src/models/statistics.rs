use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::code::{PshiftCode, ShiftType, Subgroup};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    pub counts: BTreeMap<PshiftCode, usize>,
    pub count_a0: usize,
    pub count_ab: usize,
    pub count_a0_noncontinuing: usize,
    pub count_ab_noncontinuing: usize,
}

impl FrequencyTable {
    /// Tallies codes; every one of the 13 codes gets an entry, even at zero.
    pub fn from_codes(codes: impl IntoIterator<Item = PshiftCode>) -> Self {
        let mut counts = PshiftCode::ALL
            .into_iter()
            .map(|code| (code, 0usize))
            .collect::<BTreeMap<_, _>>();
        for code in codes {
            *counts.entry(code).or_default() += 1;
        }

        let mut table = Self {
            counts,
            ..Self::default()
        };
        for (code, count) in &table.counts {
            let continuing = !code.is_speaker_change();
            match code.subgroup() {
                Subgroup::Undirected => {
                    table.count_a0 += count;
                    if !continuing {
                        table.count_a0_noncontinuing += count;
                    }
                }
                Subgroup::Directed => {
                    table.count_ab += count;
                    if !continuing {
                        table.count_ab_noncontinuing += count;
                    }
                }
            }
        }
        table
    }

    #[must_use]
    pub fn frequency(&self, code: PshiftCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.count_a0 + self.count_ab
    }

    #[must_use]
    pub const fn subgroup_total(&self, subgroup: Subgroup) -> usize {
        match subgroup {
            Subgroup::Undirected => self.count_a0,
            Subgroup::Directed => self.count_ab,
        }
    }

    #[must_use]
    pub const fn subgroup_noncontinuing_total(&self, subgroup: Subgroup) -> usize {
        match subgroup {
            Subgroup::Undirected => self.count_a0_noncontinuing,
            Subgroup::Directed => self.count_ab_noncontinuing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub code: PshiftCode,
    pub frequency: usize,
    pub probability: f64,
    /// P(S|D): frequency over the code's subgroup total.
    pub cp: f64,
    /// P(S|D,C): frequency over the subgroup total without turn-continuing
    /// codes. Absent for the continuing codes themselves.
    pub cpetc: Option<f64>,
    pub is_speaker_change: bool,
    pub is_directed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Propensities {
    pub turn_receiving: f64,
    pub targeting: f64,
    pub termination: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTypeShare {
    pub shift_type: ShiftType,
    pub frequency: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentStatistics {
    pub segment_index: usize,
    /// Half-open turn range `[start_turn, end_turn)`.
    pub start_turn: usize,
    pub end_turn: usize,
    pub rows: Vec<StatisticsRow>,
    /// Propensities over this part's rows only.
    pub propensities: Propensities,
}
