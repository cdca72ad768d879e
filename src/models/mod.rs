// Model exports
pub mod domain;
pub mod summary;

pub use domain::{
    Catalog, Category, Coordinate, Institution, InstitutionId, PairDistances, ScoreMode,
    TierGroup, Triplet, TripletKey,
};
pub use summary::{MemberSummary, ReportSummary, TierSummary, TripletSummary};
