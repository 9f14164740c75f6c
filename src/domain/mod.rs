//! Core business models, contracts and the risk model.
//!
//! Nothing in this layer performs I/O; persistence lives behind the
//! repository traits and is implemented in `infrastructure`.

pub mod action;
pub mod entry;
pub mod error;
pub mod gate;
pub mod repositories;
pub mod risk;
pub mod user;

pub use action::{
    Action, ActionPriority, ActionRepositoryInterface, ActionUpdate, ActionWithEntry, NewAction,
};
pub use entry::{EntryFilter, EntryRepositoryInterface, EntryStatus, EntryUpdate, FmeaEntry, NewEntry};
pub use error::{DomainError, DomainResult};
pub use gate::{AccessGate, Identity, RequiredRole};
pub use repositories::RepositoryProvider;
pub use risk::{classify_risk, compute_rpn, RiskLevel};
pub use user::{CreateUserData, User, UserRepositoryInterface, UserRole};
