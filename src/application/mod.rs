//! Application services over the domain: statistics aggregation and
//! CSV export.

pub mod services;

pub use services::{compute_statistics, export_entries_csv, Statistics};
