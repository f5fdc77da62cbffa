// Two-file comparison. Purely numeric: paths and languages are carried
// through but never required to match.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{ComparisonResult, FileAnalysisResult};

/// Compute `after − before` for scores, ratios and every node kind seen on
/// either side. A kind missing from one side counts as zero there.
pub fn compare(before: &FileAnalysisResult, after: &FileAnalysisResult) -> ComparisonResult {
    let kinds: BTreeSet<&str> = before
        .breakdown
        .kinds()
        .chain(after.breakdown.kinds())
        .map(|(kind, _)| kind)
        .collect();

    let mut per_kind_count_delta = BTreeMap::new();
    let mut per_kind_contribution_delta = BTreeMap::new();
    for kind in kinds {
        per_kind_count_delta.insert(
            kind.to_string(),
            signed_delta(before.breakdown.count(kind), after.breakdown.count(kind)),
        );
        per_kind_contribution_delta.insert(
            kind.to_string(),
            after.breakdown.contribution(kind) - before.breakdown.contribution(kind),
        );
    }

    ComparisonResult {
        before_path: before.path.clone(),
        after_path: after.path.clone(),
        score_delta: after.total_score() - before.total_score(),
        ratio_delta: after.ratio - before.ratio,
        line_delta: signed_delta(before.line_count, after.line_count),
        physical_line_delta: signed_delta(before.physical_lines, after.physical_lines),
        node_delta: signed_delta(before.node_count(), after.node_count()),
        per_kind_count_delta,
        per_kind_contribution_delta,
    }
}

fn signed_delta(before: u64, after: u64) -> i64 {
    let magnitude = i64::try_from(before.abs_diff(after)).unwrap_or(i64::MAX);
    if after >= before { magnitude } else { -magnitude }
}
