//! Backend API contract
//!
//! Request/response shapes for the backend's priority endpoints. This
//! module has no HTTP dependency; `priorify-client` performs the calls.
//!
//! # Endpoints
//!
//! - `POST /api/priorities/high` with a JSON array of `{category, rank}`
//! - `POST /api/priorities/low` with a JSON array of `{category, rank}`
//! - `GET /api/priorities/high` and `GET /api/priorities/low`

pub mod types;

pub use types::{PrioritySubmission, StoredPriority};

/// Path of the ranked list endpoint for `kind` ("high" or "low")
pub fn priorities_path(kind: &str) -> String {
    format!("/api/priorities/{}", kind)
}
