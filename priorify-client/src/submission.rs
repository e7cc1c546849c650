//! Submission adapter
//!
//! Turns the in-memory assignment into one backend write per user-initiated
//! submit. Incomplete assignments never reach the network, and a second
//! submit while one is in flight is rejected rather than queued. Failures are
//! reported once and never retried; the caller's state is only borrowed, so
//! it is unchanged whatever the outcome.

use std::sync::atomic::{AtomicBool, Ordering};

use priorify_common::api::PrioritySubmission;
use priorify_common::{AssignmentStep, PriorityStore};
use thiserror::Error;
use tracing::{info, warn};

use crate::api_client::{ApiError, PriorityApi};

/// Submit failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Completion rule not met; nothing was sent
    #[error("Priority assignment incomplete (next step: {0:?})")]
    Incomplete(AssignmentStep),

    /// Another submission has not finished yet
    #[error("A priority submission is already in progress")]
    AlreadySubmitting,

    /// Backend write failed
    #[error("Priority save failed: {0}")]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Single notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Incomplete(AssignmentStep::High) => {
                "Finish choosing high priority categories before saving.".to_string()
            }
            SubmitError::Incomplete(_) => {
                "Finish choosing low priority categories before saving.".to_string()
            }
            SubmitError::AlreadySubmitting => "Saving priorities, please wait.".to_string(),
            SubmitError::Api(_) => "Failed to save priorities. Please try again.".to_string(),
        }
    }
}

/// Validates and writes assignments through a [`PriorityApi`]
pub struct SubmissionAdapter<A> {
    api: A,
    in_flight: AtomicBool,
}

impl<A: PriorityApi> SubmissionAdapter<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether a submission is currently awaiting the backend
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validate `store` and write both ranked lists
    pub async fn submit(&self, store: &PriorityStore) -> Result<(), SubmitError> {
        if !store.is_complete() {
            let step = store.step();
            warn!(?step, "Rejecting incomplete priority submission");
            return Err(SubmitError::Incomplete(step));
        }

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            warn!("Rejecting priority submission while another is in flight");
            SubmitError::AlreadySubmitting
        })?;

        let submission = PrioritySubmission::from(store.state());
        match self.api.save_priorities(&submission).await {
            Ok(()) => {
                info!(
                    high = submission.high_priorities.len(),
                    low = submission.low_priorities.len(),
                    "Priority submission accepted"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Priority submission failed");
                Err(SubmitError::Api(e))
            }
        }
    }
}

/// Clears the busy flag when the submission future completes or is dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
