//! Completion rules
//!
//! Decides when an assignment may be submitted. The current product only
//! needs one entry in each ranked bucket; the earlier variant demanded an
//! exact count in both and is kept selectable through configuration so the
//! client can match whatever the backend validates.

use serde::{Deserialize, Serialize};

use crate::priority::{Priority, PriorityState};

/// Submission readiness rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CompletionRule {
    /// At least one category in `High` and one in `Low`
    AtLeastOne,
    /// Exactly `count` categories in each of `High` and `Low`
    Exactly { count: usize },
}

impl Default for CompletionRule {
    fn default() -> Self {
        CompletionRule::AtLeastOne
    }
}

/// Which bucket the user should fill next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStep {
    High,
    Low,
    Complete,
}

/// Default readiness check: `len(High) >= 1 && len(Low) >= 1`
///
/// # Examples
///
/// ```
/// use priorify_common::completion::is_complete;
/// use priorify_common::Priority;
///
/// let x = Priority::new("가사", 1);
/// let y = Priority::new("건강", 1);
/// assert!(!is_complete(&[], &[x.clone()]));
/// assert!(is_complete(&[x], &[y]));
/// ```
pub fn is_complete(high: &[Priority], low: &[Priority]) -> bool {
    CompletionRule::AtLeastOne.is_satisfied_by(high, low)
}

impl CompletionRule {
    /// Whether both lists satisfy the rule
    pub fn is_satisfied_by(&self, high: &[Priority], low: &[Priority]) -> bool {
        !self.needs_more(high.len()) && !self.needs_more(low.len())
    }

    pub fn is_satisfied(&self, state: &PriorityState) -> bool {
        self.is_satisfied_by(state.high(), state.low())
    }

    /// Guided step: `High` first, then `Low`
    pub fn step(&self, state: &PriorityState) -> AssignmentStep {
        if self.needs_more(state.high().len()) {
            AssignmentStep::High
        } else if self.needs_more(state.low().len()) {
            AssignmentStep::Low
        } else {
            AssignmentStep::Complete
        }
    }

    /// Entries each ranked bucket must hold, when the rule fixes one
    pub fn required(&self) -> Option<usize> {
        match self {
            CompletionRule::AtLeastOne => None,
            CompletionRule::Exactly { count } => Some(*count),
        }
    }

    /// Progress label for a bucket holding `assigned` entries ("2/3" or "2")
    pub fn progress(&self, assigned: usize) -> String {
        match self.required() {
            Some(required) => format!("{}/{}", assigned, required),
            None => assigned.to_string(),
        }
    }

    fn needs_more(&self, len: usize) -> bool {
        match self {
            CompletionRule::AtLeastOne => len == 0,
            CompletionRule::Exactly { count } => len != *count,
        }
    }
}
