use anyhow::{Context, Result};
use parshift_core::models::{
    AddressingMode, AnnotatedTurn, Conversation, Propensities, SegmentStatistics,
};
use parshift_core::{
    AnalysisConfig, PshiftCode, ZeroDivisionPolicy, analyze, compute_propensities,
    compute_statistics_with, load_conversation, segment_and_classify, segment_statistics,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Commands, InputArgs, StatsArgs};

mod support;


use self::support::{classifications_of, print_json};

pub(crate) fn run(command: Commands, mode: Option<AddressingMode>) -> Result<()> {
    let output = render(command, mode)?;
    print_json(&output)
}

pub(super) fn render(command: Commands, mode: Option<AddressingMode>) -> Result<serde_json::Value> {
    let value = match command {
        Commands::Annotate(InputArgs { input }) => {
            let conversation = load(&input, mode)?;
            let turns = segment_and_classify(&conversation)?;
            let rows = turns.iter().map(LabelledTurn::from).collect::<Vec<_>>();
            serde_json::to_value(rows)?
        }
        Commands::Stats(args) => {
            let config = resolve_config(&args)?;
            let conversation = load(&args.input, mode)?;
            let turns = segment_and_classify(&conversation)?;
            if config.segments == 1 {
                let rows = compute_statistics_with(&classifications_of(&turns), config.zero_division)?;
                serde_json::to_value(rows)?
            } else {
                serde_json::to_value(segment_statistics(
                    &turns,
                    config.segments,
                    config.zero_division,
                )?)?
            }
        }
        Commands::Propensities(args) => {
            let config = resolve_config(&args)?;
            let conversation = load(&args.input, mode)?;
            let turns = segment_and_classify(&conversation)?;
            if config.segments == 1 {
                let rows = compute_statistics_with(&classifications_of(&turns), config.zero_division)?;
                serde_json::to_value(compute_propensities(&rows)?)?
            } else {
                let parts = segment_statistics(&turns, config.segments, config.zero_division)?
                    .into_iter()
                    .map(SegmentPropensities::from)
                    .collect::<Vec<_>>();
                serde_json::to_value(parts)?
            }
        }
        Commands::Analyze(args) => {
            let config = resolve_config(&args)?;
            let conversation = load(&args.input, mode)?;
            serde_json::to_value(analyze(&conversation, &config)?)?
        }
        Commands::Code(args) => {
            let code = args
                .code
                .trim()
                .parse::<PshiftCode>()
                .with_context(|| format!("invalid participation shift code '{}'", args.code))?;
            serde_json::to_value(CodeDescription::from(code))?
        }
    };
    Ok(value)
}

fn load(path: &std::path::Path, mode: Option<AddressingMode>) -> Result<Conversation> {
    load_conversation(path, mode)
        .with_context(|| format!("failed to load conversation from {}", path.display()))
}

/// Environment first, then command-line flags on top.
fn resolve_config(args: &StatsArgs) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::from_env().context("invalid PARSHIFT_* environment")?;
    if let Some(segments) = args.segments {
        config.segments = segments;
    }
    if args.strict_zero_division {
        config.zero_division = ZeroDivisionPolicy::Fail;
    }
    config.validate()?;
    debug!(
        segments = config.segments,
        zero_division = %config.zero_division,
        "resolved analysis config"
    );
    Ok(config)
}

/// An annotated turn with its `"a to b, c to d"` description.
#[derive(Debug, Serialize)]
struct LabelledTurn<'a> {
    #[serde(flatten)]
    annotated: &'a AnnotatedTurn,
    label: String,
}

impl<'a> From<&'a AnnotatedTurn> for LabelledTurn<'a> {
    fn from(annotated: &'a AnnotatedTurn) -> Self {
        Self {
            annotated,
            label: annotated.classification.label(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SegmentPropensities {
    segment_index: usize,
    start_turn: usize,
    end_turn: usize,
    propensities: Propensities,
}

impl From<SegmentStatistics> for SegmentPropensities {
    fn from(part: SegmentStatistics) -> Self {
        Self {
            segment_index: part.segment_index,
            start_turn: part.start_turn,
            end_turn: part.end_turn,
            propensities: part.propensities,
        }
    }
}

#[derive(Debug, Serialize)]
struct CodeDescription {
    code: PshiftCode,
    shift_type: parshift_core::ShiftType,
    display_position: usize,
    is_speaker_change: bool,
    is_directed: bool,
}

impl From<PshiftCode> for CodeDescription {
    fn from(code: PshiftCode) -> Self {
        Self {
            code,
            shift_type: code.shift_type(),
            display_position: code.display_position(),
            is_speaker_change: code.is_speaker_change(),
            is_directed: code.is_directed(),
        }
    }
}
