//! Command-line label lists to categories
//!
//! Turns the `--high`/`--low` label lists into categories before anything is
//! dispatched. Unknown labels and labels named more than once (in one list
//! or across both) are rejected.

use std::collections::HashSet;

use priorify_common::{Category, CategoryUniverse, Error, Result};

/// Resolve both lists, blank entries skipped, order kept
pub fn resolve_assignment(
    universe: &CategoryUniverse,
    high: &[String],
    low: &[String],
) -> Result<(Vec<Category>, Vec<Category>)> {
    let high = resolve_list(universe, high)?;
    let low = resolve_list(universe, low)?;

    let mut seen = HashSet::new();
    for category in high.iter().chain(low.iter()) {
        if !seen.insert(category) {
            return Err(Error::InvalidInput(format!(
                "category {} is listed more than once",
                category
            )));
        }
    }

    Ok((high, low))
}

fn resolve_list(universe: &CategoryUniverse, labels: &[String]) -> Result<Vec<Category>> {
    labels
        .iter()
        .filter(|label| !label.trim().is_empty())
        .map(|label| universe.resolve(label))
        .collect()
}
