use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// The three program types being cross-referenced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medical,
    Pharmacy,
    Mfa,
}

impl Category {
    /// Parse the label used in the source table.
    ///
    /// Anything other than the three known labels yields `None`; callers
    /// drop those rows.
    pub fn from_source_label(label: &str) -> Option<Self> {
        match label {
            "Medical" => Some(Category::Medical),
            "Pharmacy" => Some(Category::Pharmacy),
            "MFA" => Some(Category::Mfa),
            _ => None,
        }
    }

    /// Short label printed in the report
    pub fn report_label(&self) -> &'static str {
        match self {
            Category::Medical => "Med",
            Category::Pharmacy => "Pharm",
            Category::Mfa => "MFA",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_label())
    }
}

/// Stable identity of a loaded row (zero-based data row index)
pub type InstitutionId = usize;

/// A single loaded institution
///
/// Two institutions are the same only if they share an `id`. Field-equal
/// rows loaded twice stay distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: InstitutionId,
    pub category: Category,
    pub name: String,
    pub state: String,
    pub city: String,
    pub coordinate: Coordinate,
}

/// Institutions split by category, in load order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub medical: Vec<Institution>,
    pub pharmacy: Vec<Institution>,
    pub mfa: Vec<Institution>,
    /// Longest name (in chars) across every data row, including skipped ones
    pub max_name_len: usize,
}

impl Catalog {
    /// Append an institution to its category bucket
    pub fn push(&mut self, institution: Institution) {
        self.max_name_len = self.max_name_len.max(institution.name.chars().count());
        match institution.category {
            Category::Medical => self.medical.push(institution),
            Category::Pharmacy => self.pharmacy.push(institution),
            Category::Mfa => self.mfa.push(institution),
        }
    }

    pub fn len(&self) -> usize {
        self.medical.len() + self.pharmacy.len() + self.mfa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Upper bound on the triplets a single tier can hold
    pub fn combinations(&self) -> usize {
        self.medical.len() * self.pharmacy.len() * self.mfa.len()
    }
}

/// Identity of a triplet: the ids of its three members in slot order
pub type TripletKey = (InstitutionId, InstitutionId, InstitutionId);

/// One institution per category, in the fixed Medical, Pharmacy, MFA order
#[derive(Debug, Clone, Copy)]
pub struct Triplet<'a> {
    pub medical: &'a Institution,
    pub pharmacy: &'a Institution,
    pub mfa: &'a Institution,
}

impl<'a> Triplet<'a> {
    pub fn new(medical: &'a Institution, pharmacy: &'a Institution, mfa: &'a Institution) -> Self {
        Self {
            medical,
            pharmacy,
            mfa,
        }
    }

    pub fn key(&self) -> TripletKey {
        (self.medical.id, self.pharmacy.id, self.mfa.id)
    }

    /// Members in slot order
    pub fn members(&self) -> [&'a Institution; 3] {
        [self.medical, self.pharmacy, self.mfa]
    }
}

/// Pairwise distances of a triplet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairDistances {
    /// medical to pharmacy
    pub ab: f64,
    /// pharmacy to mfa
    pub bc: f64,
    /// medical to mfa
    pub ac: f64,
}

impl PairDistances {
    /// True mean of the three distances
    pub fn mean(&self) -> f64 {
        (self.ab + self.bc + self.ac) / 3.0
    }

    pub fn all_below(&self, threshold: f64) -> bool {
        self.ab < threshold && self.bc < threshold && self.ac < threshold
    }
}

/// How triplets are ordered within a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    /// `ab + bc + ac / 3`, matching the historical report ordering
    #[default]
    Literal,
    /// `(ab + bc + ac) / 3`
    Mean,
}

impl std::str::FromStr for ScoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "literal" => Ok(ScoreMode::Literal),
            "mean" => Ok(ScoreMode::Mean),
            other => Err(format!("unknown score mode '{}', expected 'literal' or 'mean'", other)),
        }
    }
}

/// One report section: a threshold and its ranked, deduplicated triplets
#[derive(Debug, Clone)]
pub struct TierGroup<'a> {
    pub threshold: f64,
    pub triplets: Vec<Triplet<'a>>,
}

impl<'a> TierGroup<'a> {
    pub fn len(&self) -> usize {
        self.triplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triplets.is_empty()
    }
}
