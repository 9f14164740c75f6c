pub mod export;
pub mod statistics;

pub use export::{export_entries_csv, CSV_HEADERS};
pub use statistics::{compute_statistics, RiskDistribution, Statistics, StatusDistribution};
