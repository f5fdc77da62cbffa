#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Language identity ─────────────────────────────────────────────

/// Identifies the grammar (and weight table) a file belongs to.
///
/// Identifiers are trimmed and lowercased on construction, so `"Python"` and
/// `"python"` name the same language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ── Breakdown ──────────────────────────────────────────────────────

/// Per-kind statistics inside a [`Breakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindStats {
    pub count: u64,
    /// Weight applied to every node of this kind during the traversal.
    pub weight: f64,
    /// Always `count × weight`.
    pub contribution: f64,
}

/// Result of scoring one tree: node counts and weighted contributions per kind.
///
/// `total_score` is the sum of all contributions, accumulated in kind order
/// so the same counts always produce the same total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    kinds: BTreeMap<String, KindStats>,
    total_score: f64,
    node_count: u64,
}

impl Breakdown {
    /// Build a breakdown from raw per-kind counts, resolving each kind's weight
    /// through `weight_for`.
    pub fn from_counts<I, F>(counts: I, weight_for: F) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
        F: Fn(&str) -> f64,
    {
        let mut merged: BTreeMap<String, u64> = BTreeMap::new();
        for (kind, count) in counts {
            *merged.entry(kind).or_insert(0) += count;
        }

        let mut total_score = 0.0;
        let mut node_count = 0;
        let kinds = merged
            .into_iter()
            .map(|(kind, count)| {
                let weight = weight_for(&kind);
                let contribution = count as f64 * weight;
                total_score += contribution;
                node_count += count;
                (
                    kind,
                    KindStats {
                        count,
                        weight,
                        contribution,
                    },
                )
            })
            .collect();

        Self {
            kinds,
            total_score,
            node_count,
        }
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Total number of nodes visited.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Per-kind statistics in kind order.
    pub fn kinds(&self) -> impl Iterator<Item = (&str, &KindStats)> {
        self.kinds.iter().map(|(k, s)| (k.as_str(), s))
    }

    pub fn get(&self, kind: &str) -> Option<&KindStats> {
        self.kinds.get(kind)
    }

    /// Node count for `kind`, zero when the kind never occurred.
    pub fn count(&self, kind: &str) -> u64 {
        self.kinds.get(kind).map_or(0, |s| s.count)
    }

    /// Weighted contribution of `kind`, zero when the kind never occurred.
    pub fn contribution(&self, kind: &str) -> f64 {
        self.kinds.get(kind).map_or(0.0, |s| s.contribution)
    }

    /// Kinds ordered by contribution, largest first; ties broken by kind name.
    pub fn by_contribution(&self) -> Vec<(&str, &KindStats)> {
        let mut entries: Vec<_> = self.kinds().collect();
        entries.sort_by(|a, b| {
            b.1.contribution
                .total_cmp(&a.1.contribution)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}

// ── Per-file result ────────────────────────────────────────────────

/// Score of a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysisResult {
    /// Caller-supplied identifier, usually the file path.
    pub path: String,
    pub language: LanguageId,
    /// Lines used as the ratio denominator (non-blank source lines for files).
    pub line_count: u64,
    /// Every line of the file, blank ones included.
    #[serde(default)]
    pub physical_lines: u64,
    pub breakdown: Breakdown,
    /// `total_score / line_count`, or 0 for a file without lines.
    pub ratio: f64,
}

impl FileAnalysisResult {
    pub fn new(
        path: impl Into<String>,
        language: LanguageId,
        line_count: u64,
        breakdown: Breakdown,
    ) -> Self {
        let ratio = ratio(breakdown.total_score(), line_count);
        Self {
            path: path.into(),
            language,
            line_count,
            physical_lines: line_count,
            breakdown,
            ratio,
        }
    }

    /// Record the physical line count when it differs from `line_count`.
    #[must_use]
    pub fn with_physical_lines(mut self, physical_lines: u64) -> Self {
        self.physical_lines = physical_lines;
        self
    }

    pub fn total_score(&self) -> f64 {
        self.breakdown.total_score()
    }

    pub fn node_count(&self) -> u64 {
        self.breakdown.node_count()
    }
}

/// Score per line, defined as 0 when there are no lines.
pub fn ratio(score: f64, lines: u64) -> f64 {
    if lines == 0 {
        0.0
    } else {
        score / lines as f64
    }
}

// ── Comparison ─────────────────────────────────────────────────────

/// Direction of a score change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increased,
    Decreased,
    Unchanged,
}

/// Delta between two file results (`after − before`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub before_path: String,
    pub after_path: String,
    pub score_delta: f64,
    pub ratio_delta: f64,
    /// Change in non-blank lines.
    pub line_delta: i64,
    /// Change in physical lines.
    #[serde(default)]
    pub physical_line_delta: i64,
    pub node_delta: i64,
    /// Signed count change for every kind seen on either side.
    pub per_kind_count_delta: BTreeMap<String, i64>,
    /// Signed contribution change for every kind seen on either side.
    pub per_kind_contribution_delta: BTreeMap<String, f64>,
}

impl ComparisonResult {
    pub fn trend(&self) -> Trend {
        if self.score_delta > 0.0 {
            Trend::Increased
        } else if self.score_delta < 0.0 {
            Trend::Decreased
        } else {
            Trend::Unchanged
        }
    }

    /// Kinds whose count or contribution changed, in kind order.
    pub fn changed_kinds(&self) -> impl Iterator<Item = (&str, i64, f64)> {
        self.per_kind_count_delta
            .iter()
            .map(|(kind, &count)| {
                let contribution = self
                    .per_kind_contribution_delta
                    .get(kind)
                    .copied()
                    .unwrap_or(0.0);
                (kind.as_str(), count, contribution)
            })
            .filter(|(_, count, contribution)| *count != 0 || *contribution != 0.0)
    }
}

// ── Aggregation ────────────────────────────────────────────────────

/// Per-language subtotal inside an [`AggregateResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub file_count: u64,
    pub score_subtotal: f64,
    pub line_subtotal: u64,
    /// Share of the batch's total score, in percent.
    pub percentage: f64,
    /// Share of the batch's files, in percent.
    pub file_percentage: f64,
}

/// Totals over a batch of file results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_files: u64,
    pub total_score: f64,
    pub total_lines: u64,
    #[serde(default)]
    pub total_physical_lines: u64,
    pub total_nodes: u64,
    /// `total_score / total_lines` over the whole batch, not a mean of file ratios.
    pub average_ratio: f64,
    pub by_language: BTreeMap<LanguageId, LanguageSummary>,
}
