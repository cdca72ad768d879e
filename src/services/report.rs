use crate::core::{distance::pair_distances, scoring::rank_score};
use crate::models::{
    Institution, MemberSummary, ReportSummary, ScoreMode, TierGroup, TierSummary, Triplet,
    TripletSummary,
};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Width of the category label column
const LABEL_WIDTH: usize = 5;

/// Errors that can occur while writing report files
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Renders ranked tiers as the plain-text grouping report
///
/// Each tier becomes a `Within {threshold} {unit} ({count}):` header
/// followed by three detail lines per triplet and its average distance.
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    name_width: usize,
    unit_label: String,
    earth_radius: f64,
}

impl ReportFormatter {
    pub fn new(name_width: usize, unit_label: impl Into<String>, earth_radius: f64) -> Self {
        Self {
            name_width,
            unit_label: unit_label.into(),
            earth_radius,
        }
    }

    /// Render every tier into a single string
    pub fn render(&self, tiers: &[TierGroup<'_>]) -> String {
        let mut out = String::new();

        for (i, tier) in tiers.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            // Writing into a String cannot fail
            let _ = write!(
                out,
                "Within {} {} ({}):",
                tier.threshold,
                self.unit_label,
                tier.len()
            );

            for triplet in &tier.triplets {
                self.render_triplet(&mut out, triplet);
            }
        }

        out
    }

    fn render_triplet(&self, out: &mut String, triplet: &Triplet<'_>) {
        for member in triplet.members() {
            self.render_member(out, member);
        }

        let average = pair_distances(triplet, self.earth_radius).mean();
        let _ = write!(out, "\nAverage Distance: {:.4} {}", average, self.unit_label);
        out.push('\n');
    }

    fn render_member(&self, out: &mut String, member: &Institution) {
        let _ = write!(
            out,
            "\n{:<label$} | {:<name$} | {} | {}",
            member.category.report_label(),
            member.name,
            member.state,
            member.city,
            label = LABEL_WIDTH,
            name = self.name_width,
        );
    }
}

/// Build the JSON summary for a set of ranked tiers
pub fn build_summary(
    tiers: &[TierGroup<'_>],
    input_path: &str,
    score_mode: ScoreMode,
    unit_label: &str,
    earth_radius: f64,
) -> ReportSummary {
    let tiers = tiers
        .iter()
        .map(|tier| TierSummary {
            threshold: tier.threshold,
            count: tier.len(),
            triplets: tier
                .triplets
                .iter()
                .map(|triplet| {
                    let distances = pair_distances(triplet, earth_radius);
                    TripletSummary {
                        members: triplet.members().iter().map(|m| member_summary(m)).collect(),
                        average_distance: distances.mean(),
                        rank_score: rank_score(&distances, score_mode),
                        distances,
                    }
                })
                .collect(),
        })
        .collect();

    ReportSummary {
        generated_at: chrono::Utc::now(),
        input_path: input_path.to_string(),
        score_mode,
        unit_label: unit_label.to_string(),
        tiers,
    }
}

fn member_summary(institution: &Institution) -> MemberSummary {
    MemberSummary {
        id: institution.id,
        category: institution.category,
        name: institution.name.clone(),
        state: institution.state.clone(),
        city: institution.city.clone(),
    }
}

/// Write a rendered report, creating the parent directory if needed
///
/// The caller renders the whole report first, so a failure here never
/// leaves a partially generated report behind.
pub fn write_report(path: impl AsRef<Path>, contents: &str) -> Result<(), ReportError> {
    let path = path.as_ref();
    prepare_parent(path)?;

    fs::write(path, contents).map_err(|source| io_error(path, source))?;
    tracing::info!("Wrote report to {:?} ({} bytes)", path, contents.len());

    Ok(())
}

/// Serialize the JSON summary without touching the filesystem
pub fn summary_json(summary: &ReportSummary) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Write an already serialized JSON summary
pub fn write_summary(path: impl AsRef<Path>, json: &str) -> Result<(), ReportError> {
    let path = path.as_ref();
    prepare_parent(path)?;

    fs::write(path, json).map_err(|source| io_error(path, source))?;
    tracing::info!("Wrote summary to {:?}", path);

    Ok(())
}

/// Create the parent directory of `path` if it is missing
pub fn prepare_parent(path: &Path) -> Result<(), ReportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))
        }
        _ => Ok(()),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Io {
        path: path.display().to_string(),
        source,
    }
}
