//! priorify-client library - backend access for the priority model
//!
//! Wraps the framework-free model in `priorify-common` with the pieces
//! that talk to the backend: an HTTP client, the submission adapter, and a
//! session tying a store to both.

pub mod api_client;
pub mod labels;
pub mod report;
pub mod session;
pub mod submission;

pub use api_client::{ApiError, HttpPriorityApi, PriorityApi, StoredPriorities};
pub use session::PrioritySession;
pub use submission::{SubmissionAdapter, SubmitError};
