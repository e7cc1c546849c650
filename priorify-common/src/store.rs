//! Bucket assignment store
//!
//! Holds the category universe alongside the current [`PriorityState`] and
//! is the single entry point the UI layer dispatches actions to. Moves that
//! name a category outside the universe are ignored so every category stays
//! in exactly one of `High`, `Normal`, `Low`.

use tracing::{debug, warn};

use crate::category::{Category, CategoryUniverse};
use crate::completion::{AssignmentStep, CompletionRule};
use crate::priority::{reduce, Bucket, Priority, PriorityAction, PriorityState};

#[derive(Debug, Clone)]
pub struct PriorityStore {
    universe: CategoryUniverse,
    rule: CompletionRule,
    state: PriorityState,
}

impl PriorityStore {
    /// Empty store: every category starts in `Normal`
    pub fn new(universe: CategoryUniverse, rule: CompletionRule) -> Self {
        Self {
            universe,
            rule,
            state: PriorityState::new(),
        }
    }

    /// Apply one action; returns whether the assignment changed
    pub fn dispatch(&mut self, action: PriorityAction) -> bool {
        if let Some(category) = action.category() {
            if !self.universe.contains(category) {
                warn!(category = %category, "Ignoring move for category outside universe");
                return false;
            }
        }

        let next = reduce(&self.state, &action);
        if next == self.state {
            return false;
        }

        debug!(
            ?action,
            high = next.high().len(),
            low = next.low().len(),
            "Priority assignment updated"
        );
        self.state = next;
        true
    }

    /// Replace the assignment with lists stored by the backend
    pub fn load(&mut self, high: Vec<Priority>, low: Vec<Priority>) {
        self.state = PriorityState::from_stored(&self.universe, high, low);
        debug!(
            high = self.state.high().len(),
            low = self.state.low().len(),
            "Priority assignment loaded"
        );
    }

    /// Back to the empty assignment
    pub fn reset(&mut self) {
        self.dispatch(PriorityAction::Reset);
    }

    pub fn universe(&self) -> &CategoryUniverse {
        &self.universe
    }

    pub fn rule(&self) -> CompletionRule {
        self.rule
    }

    pub fn state(&self) -> &PriorityState {
        &self.state
    }

    pub fn high(&self) -> &[Priority] {
        self.state.high()
    }

    pub fn low(&self) -> &[Priority] {
        self.state.low()
    }

    /// Derived `Normal` bucket, in universe order
    pub fn normal(&self) -> Vec<&Category> {
        self.state.normal(&self.universe)
    }

    pub fn current_bucket(&self, category: &Category) -> Bucket {
        self.state.current_bucket(category)
    }

    pub fn is_complete(&self) -> bool {
        self.rule.is_satisfied(&self.state)
    }

    pub fn step(&self) -> AssignmentStep {
        self.rule.step(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PriorityStore {
        let universe = CategoryUniverse::new(["가사", "취미", "건강"]).unwrap();
        PriorityStore::new(universe, CompletionRule::AtLeastOne)
    }

    #[test]
    fn test_new_store_is_all_normal() {
        let store = store();
        assert!(store.high().is_empty());
        assert!(store.low().is_empty());
        assert_eq!(store.normal().len(), 3);
        assert_eq!(store.step(), AssignmentStep::High);
    }

    #[test]
    fn test_dispatch_reports_change() {
        let mut store = store();
        let action = PriorityAction::MoveToHigh {
            category: Category::new("가사"),
            index: None,
        };

        assert!(store.dispatch(action.clone()));
        assert!(!store.dispatch(action));
    }

    #[test]
    fn test_dispatch_ignores_unknown_category() {
        let mut store = store();
        let changed = store.dispatch(PriorityAction::MoveToLow {
            category: Category::new("업무"),
            index: None,
        });

        assert!(!changed);
        assert!(store.low().is_empty());
    }

    #[test]
    fn test_reset_and_load() {
        let mut store = store();
        store.load(
            vec![Priority::new("취미", 2), Priority::new("가사", 1)],
            vec![Priority::new("건강", 4)],
        );

        assert_eq!(store.high()[0], Priority::new("가사", 1));
        assert_eq!(store.high()[1], Priority::new("취미", 2));
        assert_eq!(store.low()[0], Priority::new("건강", 1));
        assert!(store.is_complete());

        store.reset();
        assert_eq!(store.state(), &PriorityState::new());
    }
}
