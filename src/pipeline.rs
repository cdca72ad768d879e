use thiserror::Error;
use tracing::info;

use crate::config::Settings;
use crate::services::{
    build_summary, load_catalog, prepare_parent, summary_json, write_report, write_summary,
    LoadError, LoadStats, ReportError, ReportFormatter,
};

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load institutions: {0}")]
    Load(#[from] LoadError),

    #[error("Failed to write output: {0}")]
    Report(#[from] ReportError),
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub load_stats: LoadStats,
    /// (threshold, triplet count) per tier, tightest first
    pub tier_counts: Vec<(f64, usize)>,
    pub report: String,
}

/// Load, group, rank and write the report described by `settings`
///
/// Every output is rendered, and every output directory created, before the
/// first file is written. The JSON summary, when configured, is written
/// after the text report.
pub fn run(settings: &Settings) -> Result<RunOutcome, PipelineError> {
    let (catalog, load_stats) = load_catalog(&settings.input.path)?;

    let matcher = settings.matching.matcher();
    let result = matcher.find_groupings(&catalog);

    let tier_counts: Vec<(f64, usize)> = result
        .tiers
        .iter()
        .map(|tier| (tier.threshold, tier.len()))
        .collect();
    for (threshold, count) in &tier_counts {
        info!(
            "Within {} {}: {} triplets",
            threshold, settings.matching.unit_label, count
        );
    }

    let formatter = ReportFormatter::new(
        catalog.max_name_len,
        settings.matching.unit_label.clone(),
        matcher.earth_radius(),
    );
    let report = formatter.render(&result.tiers);

    let summary = match &settings.output.summary_path {
        Some(path) => {
            let summary = build_summary(
                &result.tiers,
                &settings.input.path.display().to_string(),
                matcher.score_mode(),
                &settings.matching.unit_label,
                matcher.earth_radius(),
            );
            Some((path, summary_json(&summary)?))
        }
        None => None,
    };

    prepare_parent(&settings.output.report_path)?;
    if let Some((path, _)) = &summary {
        prepare_parent(path)?;
    }

    write_report(&settings.output.report_path, &report)?;
    if let Some((path, json)) = &summary {
        write_summary(path, json)?;
    }

    Ok(RunOutcome {
        load_stats,
        tier_counts,
        report,
    })
}
