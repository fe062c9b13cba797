use crate::code::PshiftCode;
use crate::error::{ParshiftError, Result};
use crate::models::{Propensities, StatisticsRow};

const TURN_RECEIVING: [PshiftCode; 3] = [PshiftCode::AbBa, PshiftCode::AbB0, PshiftCode::AbBy];
const TARGETING: [PshiftCode; 3] = [PshiftCode::A0Xy, PshiftCode::AbBy, PshiftCode::AbXy];
const TERMINATION: [PshiftCode; 3] = [PshiftCode::A0Ay, PshiftCode::AbA0, PshiftCode::AbAy];

/// Gibson's propensities: turn receiving and termination sum P(S|D) values,
/// targeting sums P(S|D,C) values.
pub fn compute_propensities(rows: &[StatisticsRow]) -> Result<Propensities> {
    Ok(Propensities {
        turn_receiving: sum_cp(rows, &TURN_RECEIVING)?,
        targeting: sum_cpetc(rows, &TARGETING)?,
        termination: sum_cp(rows, &TERMINATION)?,
    })
}

fn sum_cp(rows: &[StatisticsRow], codes: &[PshiftCode]) -> Result<f64> {
    codes
        .iter()
        .map(|code| find_row(rows, *code).map(|row| row.cp))
        .sum()
}

fn sum_cpetc(rows: &[StatisticsRow], codes: &[PshiftCode]) -> Result<f64> {
    codes
        .iter()
        .map(|code| {
            find_row(rows, *code)?.cpetc.ok_or_else(|| {
                ParshiftError::MissingStatistic(format!("CPeTC for {code}"))
            })
        })
        .sum()
}

fn find_row(rows: &[StatisticsRow], code: PshiftCode) -> Result<&StatisticsRow> {
    rows.iter()
        .find(|row| row.code == code)
        .ok_or_else(|| ParshiftError::MissingStatistic(format!("row for {code}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_table(cp: f64, cpetc: f64) -> Vec<StatisticsRow> {
        PshiftCode::ALL
            .into_iter()
            .map(|code| StatisticsRow {
                code,
                frequency: 0,
                probability: 0.0,
                cp,
                cpetc: code.is_speaker_change().then_some(cpetc),
                is_speaker_change: code.is_speaker_change(),
                is_directed: code.is_directed(),
            })
            .collect()
    }

    fn set(rows: &mut [StatisticsRow], code: PshiftCode, cp: f64, cpetc: Option<f64>) {
        let row = rows.iter_mut().find(|row| row.code == code).expect("row");
        row.cp = cp;
        row.cpetc = cpetc;
    }

    #[test]
    fn sums_the_fixed_code_groups() {
        let mut rows = full_table(0.0, 0.0);
        set(&mut rows, PshiftCode::AbBa, 0.2, Some(0.25));
        set(&mut rows, PshiftCode::AbB0, 0.1, Some(0.1));
        set(&mut rows, PshiftCode::AbBy, 0.3, Some(0.4));
        set(&mut rows, PshiftCode::A0Xy, 0.5, Some(0.5));
        set(&mut rows, PshiftCode::AbXy, 0.1, Some(0.1));
        set(&mut rows, PshiftCode::A0Ay, 0.25, None);
        set(&mut rows, PshiftCode::AbA0, 0.05, None);

        let propensities = compute_propensities(&rows).expect("propensities");
        assert!((propensities.turn_receiving - 0.6).abs() < 1e-9);
        assert!((propensities.targeting - 1.0).abs() < 1e-9);
        assert!((propensities.termination - 0.3).abs() < 1e-9);
    }

    #[test]
    fn zero_turn_receiving_rows_yield_zero() {
        let mut rows = full_table(0.0, 0.0);
        set(&mut rows, PshiftCode::A0Xa, 1.0, Some(1.0));
        let propensities = compute_propensities(&rows).expect("propensities");
        assert_eq!(propensities.turn_receiving, 0.0);
        assert_eq!(propensities.termination, 0.0);
    }

    #[test]
    fn missing_row_is_reported() {
        let rows = full_table(0.1, 0.1)
            .into_iter()
            .filter(|row| row.code != PshiftCode::AbB0)
            .collect::<Vec<_>>();
        let err = compute_propensities(&rows).expect_err("missing AB-B0");
        assert!(matches!(err, ParshiftError::MissingStatistic(ref s) if s.contains("AB-B0")));
    }

    #[test]
    fn missing_cpetc_is_reported() {
        let mut rows = full_table(0.1, 0.1);
        set(&mut rows, PshiftCode::AbXy, 0.1, None);
        let err = compute_propensities(&rows).expect_err("missing CPeTC");
        assert_eq!(err.code(), "MISSING_STATISTIC");
    }
}
