//! Priority API request/response types

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::priority::{Priority, PriorityState};

// ========================================
// Request Types
// ========================================

/// Both ranked lists as handed to the submission adapter
///
/// # Examples
///
/// ```
/// use priorify_common::api::PrioritySubmission;
/// use priorify_common::Priority;
///
/// let submission = PrioritySubmission {
///     high_priorities: vec![Priority::new("취미", 1)],
///     low_priorities: vec![Priority::new("건강", 1)],
/// };
/// let json = serde_json::to_value(&submission).unwrap();
/// assert_eq!(json["highPriorities"][0]["category"], "취미");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySubmission {
    pub high_priorities: Vec<Priority>,
    pub low_priorities: Vec<Priority>,
}

impl From<&PriorityState> for PrioritySubmission {
    fn from(state: &PriorityState) -> Self {
        Self {
            high_priorities: state.high().to_vec(),
            low_priorities: state.low().to_vec(),
        }
    }
}

// ========================================
// Response Types
// ========================================

/// Priority entry as returned by the backend
///
/// Stored settings may carry a computed `weight`; the client keeps it for
/// display but it plays no part in bucket assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPriority {
    pub category: Category,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl From<StoredPriority> for Priority {
    fn from(stored: StoredPriority) -> Self {
        Priority {
            category: stored.category,
            rank: stored.rank,
        }
    }
}

// ========================================
// Tests
// ========================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PriorityAction;

    #[test]
    fn test_submission_from_state() {
        let mut state = PriorityState::new();
        state.apply(&PriorityAction::MoveToHigh {
            category: Category::new("가사"),
            index: None,
        });
        state.apply(&PriorityAction::MoveToLow {
            category: Category::new("건강"),
            index: None,
        });

        let submission = PrioritySubmission::from(&state);
        assert_eq!(submission.high_priorities, vec![Priority::new("가사", 1)]);
        assert_eq!(submission.low_priorities, vec![Priority::new("건강", 1)]);
    }

    #[test]
    fn test_stored_priority_with_weight() {
        let json = r#"{"category": "업무", "rank": 2, "weight": 1.5}"#;
        let stored: StoredPriority = serde_json::from_str(json).unwrap();

        assert_eq!(stored.weight, Some(1.5));
        assert_eq!(Priority::from(stored), Priority::new("업무", 2));
    }

    #[test]
    fn test_stored_priority_without_weight() {
        let json = r#"{"category": "업무", "rank": 1}"#;
        let stored: StoredPriority = serde_json::from_str(json).unwrap();
        assert!(stored.weight.is_none());
    }
}
