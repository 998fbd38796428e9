use std::collections::HashSet;

use crate::types::Issue;

/// Drops exact duplicates, keeping the first occurrence of each issue in
/// input order.
pub fn suppress_duplicates(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen: HashSet<Issue> = HashSet::with_capacity(issues.len());
    let mut kept = Vec::with_capacity(issues.len());

    for issue in issues {
        if seen.contains(&issue) {
            tracing::trace!(line = issue.line, message = %issue.message, "重复问题已跳过");
            continue;
        }
        seen.insert(issue.clone());
        kept.push(issue);
    }

    kept
}
