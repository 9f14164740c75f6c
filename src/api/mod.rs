//! REST API module for the FMEA service
//!
//! Provides HTTP endpoints for managing FMEA entries, remediation
//! actions, CSV export and dashboard statistics.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod validated_json;

pub use router::create_api_router;
