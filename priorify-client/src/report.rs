//! Plain-text rendering of a bucket assignment

use priorify_common::{AssignmentStep, Priority, PriorityStore};

/// Three-bucket summary plus the guided next step
///
/// ```text
/// High (2): 1. 취미, 2. 가사
/// Normal (1): 휴식
/// Low (1): 1. 건강
/// Status: complete
/// ```
pub fn render_assignment(store: &PriorityStore) -> String {
    let rule = store.rule();
    let normal: Vec<&str> = store.normal().into_iter().map(|c| c.as_str()).collect();

    let status = match store.step() {
        AssignmentStep::High => "choose high priorities",
        AssignmentStep::Low => "choose low priorities",
        AssignmentStep::Complete => "complete",
    };

    [
        format!("High ({}): {}", rule.progress(store.high().len()), ranked(store.high())),
        format!("Normal ({}): {}", normal.len(), or_dash(normal.join(", "))),
        format!("Low ({}): {}", rule.progress(store.low().len()), ranked(store.low())),
        format!("Status: {}", status),
    ]
    .join("\n")
}

fn ranked(list: &[Priority]) -> String {
    let items: Vec<String> = list
        .iter()
        .map(|p| format!("{}. {}", p.rank, p.category))
        .collect();
    or_dash(items.join(", "))
}

fn or_dash(s: String) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}
