//! FMEA entries: the core record type of the service

mod model;
mod repository;

pub use model::{EntryFilter, EntryStatus, EntryUpdate, FmeaEntry, NewEntry};
pub use repository::EntryRepositoryInterface;
