//! # Priorify Common Library
//!
//! Framework-free priority bucket model shared by every Priorify front end:
//! - Category universe (the fixed schedule category vocabulary)
//! - Priority state and the pure bucket reducer
//! - Store wrapper with derived selectors
//! - Completion rules
//! - API request/response types
//! - Configuration loading

pub mod api;
pub mod category;
pub mod completion;
pub mod config;
pub mod error;
pub mod priority;
pub mod store;

pub use category::{Category, CategoryUniverse};
pub use completion::{AssignmentStep, CompletionRule};
pub use error::{Error, Result};
pub use priority::{Bucket, Priority, PriorityAction, PriorityState};
pub use store::PriorityStore;
