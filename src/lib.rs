//! # FMEA Service
//!
//! Record-keeping service for Failure Mode and Effects Analysis (FMEA):
//! stores structured risk entries, derives the Risk Priority Number
//! (RPN = severity × occurrence × detection) and a three-tier risk
//! classification on every read, and serves a login-gated REST API with
//! CSV export and dashboard statistics.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the risk model, repository and
//!   access-gate traits
//! - **application**: Statistics aggregation and CSV export
//! - **infrastructure**: External concerns (database, entities,
//!   migrations, repositories)
//! - **auth**: Password hashing, JWT session tokens, session registry
//!   and middleware
//! - **api**: REST API with Swagger documentation

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use api::create_api_router;
