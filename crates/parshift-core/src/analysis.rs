use chrono::Utc;
use tracing::info;

use crate::classify::segment_and_classify;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{AnalysisReport, Classification, Conversation, StatisticsSection};
use crate::propensity::compute_propensities;
use crate::stats::{compute_statistics_with, segment_statistics, shift_type_breakdown};

/// Runs the whole pipeline: segmentation, classification, statistics and propensities.
pub fn analyze(conversation: &Conversation, config: &AnalysisConfig) -> Result<AnalysisReport> {
    config.validate()?;

    let turns = segment_and_classify(conversation)?;
    let classifications = turns
        .iter()
        .map(|annotated| annotated.classification.clone())
        .collect::<Vec<Classification>>();
    let rows = compute_statistics_with(&classifications, config.zero_division)?;
    let propensities = compute_propensities(&rows)?;
    let shift_types = shift_type_breakdown(&rows);

    let statistics = if config.segments == 1 {
        StatisticsSection::Whole(rows)
    } else {
        StatisticsSection::Segmented(segment_statistics(
            &turns,
            config.segments,
            config.zero_division,
        )?)
    };

    info!(
        messages = conversation.len(),
        turns = turns.len(),
        segments = config.segments,
        "conversation analyzed"
    );

    Ok(AnalysisReport {
        generated_at: Utc::now(),
        mode: conversation.mode(),
        message_count: conversation.len(),
        turn_count: turns.len(),
        turns,
        statistics,
        propensities,
        shift_types,
    })
}
