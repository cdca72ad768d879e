use serde::{Deserialize, Serialize};
use crate::models::domain::{Category, InstitutionId, PairDistances, ScoreMode};

/// JSON summary written next to the text report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "inputPath")]
    pub input_path: String,
    #[serde(rename = "scoreMode")]
    pub score_mode: ScoreMode,
    #[serde(rename = "unitLabel")]
    pub unit_label: String,
    pub tiers: Vec<TierSummary>,
}

/// One tier of the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSummary {
    pub threshold: f64,
    pub count: usize,
    pub triplets: Vec<TripletSummary>,
}

/// A ranked triplet with its distances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripletSummary {
    pub members: Vec<MemberSummary>,
    pub distances: PairDistances,
    #[serde(rename = "averageDistance")]
    pub average_distance: f64,
    #[serde(rename = "rankScore")]
    pub rank_score: f64,
}

/// Institution details as they appear in the summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub id: InstitutionId,
    pub category: Category,
    pub name: String,
    pub state: String,
    pub city: String,
}
