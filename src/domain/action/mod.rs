//! Remediation actions linked to FMEA entries

mod model;
mod repository;

pub use model::{Action, ActionPriority, ActionUpdate, ActionWithEntry, NewAction};
pub use repository::ActionRepositoryInterface;
