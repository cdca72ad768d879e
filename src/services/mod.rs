// Service exports
pub mod loader;
pub mod report;

pub use loader::{load_catalog, load_catalog_from_reader, LoadError, LoadStats};
pub use report::{
    build_summary, prepare_parent, summary_json, write_report, write_summary, ReportError,
    ReportFormatter,
};
