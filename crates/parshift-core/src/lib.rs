// Public fallible APIs in this crate share one concrete error contract (`ParshiftError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod analysis;
pub mod classify;
pub mod code;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod propensity;
pub mod segment;
pub mod stats;

pub use analysis::analyze;
pub use classify::{classify, segment_and_classify};
pub use code::{PshiftCode, ShiftType, Subgroup, pshift_type};
pub use config::AnalysisConfig;
pub use error::{ParshiftError, Result};
pub use ingest::{load_conversation, parse_conversation};
pub use propensity::compute_propensities;
pub use segment::segment;
pub use stats::{
    ZeroDivisionPolicy, compute_statistics, compute_statistics_with, frequency_table,
    segment_statistics, shift_type_breakdown,
};
