use serde::Serialize;

use crate::error::{ParshiftError, Result};
use crate::stats::{MAX_SEGMENTS, ZeroDivisionPolicy};

mod env;

pub const ENV_SEGMENTS: &str = "PARSHIFT_SEGMENTS";
pub const ENV_ZERO_DIVISION: &str = "PARSHIFT_ZERO_DIVISION";

const DEFAULT_SEGMENTS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisConfig {
    /// Number of contiguous parts the statistics are split into (1..=4).
    pub segments: usize,
    pub zero_division: ZeroDivisionPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            zero_division: ZeroDivisionPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_raw(
            env::read_non_empty_env(ENV_SEGMENTS).as_deref(),
            env::read_non_empty_env(ENV_ZERO_DIVISION).as_deref(),
        )
    }

    fn from_raw(segments: Option<&str>, zero_division: Option<&str>) -> Result<Self> {
        let segments = match segments {
            None => DEFAULT_SEGMENTS,
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                ParshiftError::Validation(format!(
                    "invalid {ENV_SEGMENTS}: {raw} (expected an integer in 1..={MAX_SEGMENTS})"
                ))
            })?,
        };
        let zero_division = zero_division
            .map(str::parse::<ZeroDivisionPolicy>)
            .transpose()?
            .unwrap_or_default();
        let config = Self {
            segments,
            zero_division,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SEGMENTS).contains(&self.segments) {
            return Err(ParshiftError::InvalidSegmentCount(self.segments));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AnalysisConfig::from_raw(None, None).expect("config");
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.segments, 1);
        assert_eq!(config.zero_division, ZeroDivisionPolicy::Zero);
    }

    #[test]
    fn raw_values_are_parsed() {
        let config = AnalysisConfig::from_raw(Some(" 3 "), Some("fail")).expect("config");
        assert_eq!(config.segments, 3);
        assert_eq!(config.zero_division, ZeroDivisionPolicy::Fail);
    }

    #[test]
    fn out_of_range_segments_are_rejected() {
        let err = AnalysisConfig::from_raw(Some("5"), None).expect_err("too many segments");
        assert!(matches!(err, ParshiftError::InvalidSegmentCount(5)));
        let err = AnalysisConfig::from_raw(Some("two"), None).expect_err("not a number");
        assert!(matches!(err, ParshiftError::Validation(_)));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        assert!(AnalysisConfig::from_raw(None, Some("nan")).is_err());
    }
}
