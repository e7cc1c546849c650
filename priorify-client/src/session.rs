//! Priority screen session
//!
//! Lifecycle of one priority-setting screen: starts empty, optionally
//! hydrates from the backend, takes user moves, and resets after a
//! successful submit. A failed submit or load keeps the current assignment.

use priorify_common::{CategoryUniverse, CompletionRule, PriorityAction, PriorityStore};
use tracing::debug;

use crate::api_client::{ApiError, PriorityApi};
use crate::submission::{SubmissionAdapter, SubmitError};

pub struct PrioritySession<A> {
    store: PriorityStore,
    adapter: SubmissionAdapter<A>,
}

impl<A: PriorityApi> PrioritySession<A> {
    pub fn new(universe: CategoryUniverse, api: A, rule: CompletionRule) -> Self {
        Self {
            store: PriorityStore::new(universe, rule),
            adapter: SubmissionAdapter::new(api),
        }
    }

    pub fn store(&self) -> &PriorityStore {
        &self.store
    }

    pub fn is_submitting(&self) -> bool {
        self.adapter.is_submitting()
    }

    pub fn dispatch(&mut self, action: PriorityAction) -> bool {
        self.store.dispatch(action)
    }

    /// Replace the assignment with what the backend has stored
    pub async fn hydrate(&mut self) -> Result<(), ApiError> {
        let stored = self.adapter.api().load_priorities().await?;
        self.store.load(
            stored.high.into_iter().map(Into::into).collect(),
            stored.low.into_iter().map(Into::into).collect(),
        );
        Ok(())
    }

    /// Submit; the assignment is cleared only when the backend accepted it
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        self.adapter.submit(&self.store).await?;
        self.store.reset();
        debug!("Priority session reset after submission");
        Ok(())
    }
}
