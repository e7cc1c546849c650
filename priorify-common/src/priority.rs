//! Priority bucket model
//!
//! Categories are partitioned into three disjoint buckets. `High` and `Low`
//! are explicit ranked lists; `Normal` is whatever the universe has left over
//! and is never stored.
//!
//! All mutation goes through [`reduce`], a pure `(state, action) -> state`
//! function. After every action:
//! - a category appears at most once across `High` and `Low`
//! - ranks in each list are exactly `1..=len` in list order

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryUniverse};

/// One category's position within a ranked bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub category: Category,
    /// 1-based rank within the owning bucket
    pub rank: u32,
}

impl Priority {
    pub fn new(category: impl Into<Category>, rank: u32) -> Self {
        Self {
            category: category.into(),
            rank,
        }
    }
}

/// Priority partition a category can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    High,
    Normal,
    Low,
}

impl Bucket {
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::High => "high",
            Bucket::Normal => "normal",
            Bucket::Low => "low",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete state transition
///
/// The UI layer turns a click or a finished drag into exactly one of these,
/// with the target bucket and insertion index already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityAction {
    /// Insert into `High` at `index` (append when `None`)
    MoveToHigh {
        category: Category,
        index: Option<usize>,
    },
    /// Insert into `Low` at `index` (append when `None`)
    MoveToLow {
        category: Category,
        index: Option<usize>,
    },
    /// Drop from whichever ranked bucket holds it
    MoveToNormal { category: Category },
    /// Back to the empty assignment
    Reset,
}

impl PriorityAction {
    /// Category the action refers to, if any
    pub fn category(&self) -> Option<&Category> {
        match self {
            PriorityAction::MoveToHigh { category, .. }
            | PriorityAction::MoveToLow { category, .. }
            | PriorityAction::MoveToNormal { category } => Some(category),
            PriorityAction::Reset => None,
        }
    }
}

/// Current `High`/`Low` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityState {
    high_priorities: Vec<Priority>,
    low_priorities: Vec<Priority>,
}

impl PriorityState {
    /// Empty assignment: everything is `Normal`
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from lists stored by the backend
    ///
    /// Entries are ordered by stored rank (stable for ties). Labels outside
    /// `universe` are dropped, a category listed in both buckets stays in
    /// `High` only, repeats within one list keep the first occurrence, and
    /// ranks are reassigned from 1.
    pub fn from_stored(
        universe: &CategoryUniverse,
        mut high: Vec<Priority>,
        mut low: Vec<Priority>,
    ) -> Self {
        high.sort_by_key(|p| p.rank);
        low.sort_by_key(|p| p.rank);

        let mut seen: HashSet<Category> = HashSet::new();
        let mut keep = |p: &Priority| {
            if !universe.contains(&p.category) {
                tracing::warn!(category = %p.category, "Dropping stored priority outside category universe");
                return false;
            }
            seen.insert(p.category.clone())
        };

        let mut high: Vec<Priority> = high.into_iter().filter(|p| keep(p)).collect();
        let mut low: Vec<Priority> = low.into_iter().filter(|p| keep(p)).collect();
        rerank(&mut high);
        rerank(&mut low);

        Self {
            high_priorities: high,
            low_priorities: low,
        }
    }

    /// Ranked `High` list
    pub fn high(&self) -> &[Priority] {
        &self.high_priorities
    }

    /// Ranked `Low` list
    pub fn low(&self) -> &[Priority] {
        &self.low_priorities
    }

    /// Which bucket currently holds `category`
    pub fn current_bucket(&self, category: &Category) -> Bucket {
        if position(&self.high_priorities, category).is_some() {
            Bucket::High
        } else if position(&self.low_priorities, category).is_some() {
            Bucket::Low
        } else {
            Bucket::Normal
        }
    }

    /// Categories of `universe` in neither ranked list, in universe order
    pub fn normal<'a>(&self, universe: &'a CategoryUniverse) -> Vec<&'a Category> {
        universe
            .iter()
            .filter(|c| self.current_bucket(c) == Bucket::Normal)
            .collect()
    }

    /// Apply an action in place
    pub fn apply(&mut self, action: &PriorityAction) {
        match action {
            PriorityAction::MoveToHigh { category, index } => {
                move_into(&mut self.high_priorities, &mut self.low_priorities, category, *index)
            }
            PriorityAction::MoveToLow { category, index } => {
                move_into(&mut self.low_priorities, &mut self.high_priorities, category, *index)
            }
            PriorityAction::MoveToNormal { category } => {
                remove(&mut self.high_priorities, category);
                remove(&mut self.low_priorities, category);
            }
            PriorityAction::Reset => {
                self.high_priorities.clear();
                self.low_priorities.clear();
            }
        }
    }
}

/// Pure reducer: next state for `action`, leaving `state` as it was
///
/// # Examples
///
/// ```
/// use priorify_common::{Category, PriorityAction, PriorityState};
///
/// let state = PriorityState::new();
/// let next = priorify_common::priority::reduce(
///     &state,
///     &PriorityAction::MoveToHigh { category: Category::new("가사"), index: None },
/// );
/// assert!(state.high().is_empty());
/// assert_eq!(next.high()[0].rank, 1);
/// ```
pub fn reduce(state: &PriorityState, action: &PriorityAction) -> PriorityState {
    let mut next = state.clone();
    next.apply(action);
    next
}

// Reordering inside `dest` removes first, so `index` is measured against the
// list without the moving item.
fn move_into(
    dest: &mut Vec<Priority>,
    other: &mut Vec<Priority>,
    category: &Category,
    index: Option<usize>,
) {
    remove(other, category);
    remove(dest, category);

    let at = index.map_or(dest.len(), |i| i.min(dest.len()));
    dest.insert(at, Priority::new(category.clone(), 0));
    rerank(dest);
}

fn remove(list: &mut Vec<Priority>, category: &Category) {
    if let Some(i) = position(list, category) {
        list.remove(i);
        rerank(list);
    }
}

fn position(list: &[Priority], category: &Category) -> Option<usize> {
    list.iter().position(|p| &p.category == category)
}

fn rerank(list: &mut [Priority]) {
    for (i, p) in list.iter_mut().enumerate() {
        p.rank = i as u32 + 1;
    }
}
