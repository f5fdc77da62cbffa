// JSON report: `{summary, languages, files}` for batches, and a
// before/after/delta object for comparisons.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{RenderError, Result};
use crate::types::{
    AggregateResult, ComparisonResult, FileAnalysisResult, KindStats, LanguageId, LanguageSummary,
    Trend,
};

use super::{RenderOptions, Renderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct BatchReport<'a> {
    summary: Summary,
    languages: &'a BTreeMap<LanguageId, LanguageSummary>,
    files: Vec<FileEntry<'a>>,
}

#[derive(Serialize)]
struct Summary {
    total_files: u64,
    total_qoc: f64,
    /// Every line, blank ones included.
    total_loc: u64,
    /// Non-blank lines; the ratio denominator.
    total_sloc: u64,
    total_nodes: u64,
    average_ratio: f64,
}

#[derive(Serialize)]
struct FileEntry<'a> {
    path: &'a str,
    language: &'a LanguageId,
    qoc: f64,
    ast_nodes: u64,
    loc: u64,
    sloc: u64,
    ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    node_stats: Option<BTreeMap<&'a str, &'a KindStats>>,
}

impl<'a> FileEntry<'a> {
    fn new(result: &'a FileAnalysisResult, detailed: bool) -> Self {
        Self {
            path: &result.path,
            language: &result.language,
            qoc: result.total_score(),
            ast_nodes: result.node_count(),
            loc: result.physical_lines,
            sloc: result.line_count,
            ratio: result.ratio,
            node_stats: detailed.then(|| result.breakdown.kinds().collect()),
        }
    }
}

#[derive(Serialize)]
struct ComparisonReport<'a> {
    before: FileEntry<'a>,
    after: FileEntry<'a>,
    trend: Trend,
    delta: &'a ComparisonResult,
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render_batch(
        &self,
        results: &[FileAnalysisResult],
        aggregate: &AggregateResult,
        options: RenderOptions,
    ) -> Result<String> {
        let report = BatchReport {
            summary: Summary {
                total_files: aggregate.total_files,
                total_qoc: aggregate.total_score,
                total_loc: aggregate.total_physical_lines,
                total_sloc: aggregate.total_lines,
                total_nodes: aggregate.total_nodes,
                average_ratio: aggregate.average_ratio,
            },
            languages: &aggregate.by_language,
            files: results
                .iter()
                .map(|r| FileEntry::new(r, options.detailed))
                .collect(),
        };
        to_json(&report)
    }

    fn render_comparison(
        &self,
        before: &FileAnalysisResult,
        after: &FileAnalysisResult,
        comparison: &ComparisonResult,
    ) -> Result<String> {
        let report = ComparisonReport {
            before: FileEntry::new(before, false),
            after: FileEntry::new(after, false),
            trend: comparison.trend(),
            delta: comparison,
        };
        to_json(&report)
    }
}

fn to_json<T: Serialize>(report: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(report).map_err(RenderError::from)?;
    out.push('\n');
    Ok(out)
}
