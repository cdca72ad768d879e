use crate::models::{Catalog, Category, Coordinate, Institution};
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Column positions in the source table
const COL_LABEL: usize = 0;
const COL_NAME: usize = 1;
const COL_LATITUDE: usize = 2;
const COL_LONGITUDE: usize = 3;
const COL_CITY: usize = 4;
const COL_STATE: usize = 5;

/// Errors that can occur while loading the institution table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: missing column '{column}'")]
    MissingColumn { line: u64, column: &'static str },

    #[error("Line {line}: invalid {field} '{value}'")]
    InvalidCoordinate {
        line: u64,
        field: &'static str,
        value: String,
    },
}

/// Counters produced by a load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub medical: usize,
    pub pharmacy: usize,
    pub mfa: usize,
}

/// Load the institution table from a CSV file
///
/// The first row is a header and is discarded. Rows whose label is not one
/// of the three known categories are skipped, but their names still count
/// toward the report's name column width.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<(Catalog, LoadStats), LoadError> {
    let path = path.as_ref();
    info!("Loading institutions from {:?}", path);

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;

    load_catalog_from_reader(file)
}

/// Load the institution table from any reader
pub fn load_catalog_from_reader<R: Read>(reader: R) -> Result<(Catalog, LoadStats), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut catalog = Catalog::default();
    let mut stats = LoadStats::default();

    for (id, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        stats.rows_read += 1;

        let name = field(&record, COL_NAME, "name", line)?;
        catalog.max_name_len = catalog.max_name_len.max(name.chars().count());

        let label = field(&record, COL_LABEL, "label", line)?;
        let Some(category) = Category::from_source_label(label) else {
            debug!("Skipping line {} with unrecognized label '{}'", line, label);
            stats.rows_skipped += 1;
            continue;
        };

        let latitude = parse_degrees(&record, COL_LATITUDE, "latitude", line)?;
        let longitude = parse_degrees(&record, COL_LONGITUDE, "longitude", line)?;

        let institution = Institution {
            id,
            category,
            name: name.to_string(),
            city: field(&record, COL_CITY, "city", line)?.to_string(),
            state: field(&record, COL_STATE, "state", line)?.to_string(),
            coordinate: Coordinate::new(latitude, longitude),
        };

        match category {
            Category::Medical => stats.medical += 1,
            Category::Pharmacy => stats.pharmacy += 1,
            Category::Mfa => stats.mfa += 1,
        }
        catalog.push(institution);
    }

    info!(
        "Loaded {} institutions ({} medical, {} pharmacy, {} MFA), skipped {} rows",
        catalog.len(),
        stats.medical,
        stats.pharmacy,
        stats.mfa,
        stats.rows_skipped
    );

    Ok((catalog, stats))
}

fn field<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<&'r str, LoadError> {
    record
        .get(index)
        .ok_or(LoadError::MissingColumn { line, column })
}

/// Parse a decimal-degree column, tolerating surrounding whitespace
fn parse_degrees(
    record: &StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, LoadError> {
    let raw = field(record, index, column, line)?;

    raw.trim()
        .parse::<f64>()
        .map_err(|_| LoadError::InvalidCoordinate {
            line,
            field: column,
            value: raw.to_string(),
        })
}
