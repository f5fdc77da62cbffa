// Plain-text terminal report.

#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use crate::error::Result;
use crate::types::{AggregateResult, ComparisonResult, FileAnalysisResult, Trend};

use super::{RenderOptions, Renderer};

const RULE_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render_batch(
        &self,
        results: &[FileAnalysisResult],
        aggregate: &AggregateResult,
        options: RenderOptions,
    ) -> Result<String> {
        let mut out = String::with_capacity(1024);

        match results {
            [] => {
                let _ = writeln!(out, "No supported files found.");
            }
            [single] => render_file(&mut out, single, options.detailed),
            many => {
                render_file_table(&mut out, many);
                let _ = writeln!(out);
                render_summary(&mut out, aggregate);
                if options.detailed {
                    for result in many {
                        let _ = writeln!(out);
                        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
                        render_file(&mut out, result, true);
                    }
                }
            }
        }

        Ok(out)
    }

    fn render_comparison(
        &self,
        before: &FileAnalysisResult,
        after: &FileAnalysisResult,
        comparison: &ComparisonResult,
    ) -> Result<String> {
        let mut out = String::with_capacity(1024);
        let rule = "=".repeat(RULE_WIDTH);

        let _ = writeln!(out, "File Comparison");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>16}",
            "Metric", "Before", "After", "Difference"
        );
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:<20} {:>16.1} {:>16.1} {:>+16.1}",
            "QOC",
            before.total_score(),
            after.total_score(),
            comparison.score_delta
        );
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>+16}",
            "LOC",
            before.physical_lines,
            after.physical_lines,
            comparison.physical_line_delta
        );
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>+16}",
            "SLOC", before.line_count, after.line_count, comparison.line_delta
        );
        let _ = writeln!(
            out,
            "{:<20} {:>16} {:>16} {:>+16}",
            "AST Nodes",
            before.node_count(),
            after.node_count(),
            comparison.node_delta
        );
        let _ = writeln!(
            out,
            "{:<20} {:>16.2} {:>16.2} {:>+16.2}",
            "Efficiency Ratio", before.ratio, after.ratio, comparison.ratio_delta
        );
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Before: {}", comparison.before_path);
        let _ = writeln!(out, "After:  {}", comparison.after_path);

        let changed: Vec<_> = comparison.changed_kinds().collect();
        if !changed.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Changed node kinds:");
            let _ = writeln!(out, "{:<32} {:>10} {:>14}", "Node Type", "Count", "QOC");
            for (kind, count, contribution) in changed {
                let _ = writeln!(out, "{kind:<32} {count:>+10} {contribution:>+14.1}");
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Conclusion: {}", conclusion(comparison));
        Ok(out)
    }
}

fn conclusion(comparison: &ComparisonResult) -> String {
    match comparison.trend() {
        Trend::Increased => format!(
            "complexity increased by {:.1} QOC",
            comparison.score_delta
        ),
        Trend::Decreased => format!(
            "complexity decreased by {:.1} QOC",
            comparison.score_delta.abs()
        ),
        Trend::Unchanged => "both files have the same complexity".to_string(),
    }
}

fn render_file(out: &mut String, result: &FileAnalysisResult, detailed: bool) {
    let _ = writeln!(out, "File:                 {}", result.path);
    let _ = writeln!(out, "Language:             {}", result.language);
    let _ = writeln!(out, "Lines of Code:        {}", result.physical_lines);
    let _ = writeln!(out, "Source Lines of Code: {}", result.line_count);
    let _ = writeln!(out, "Quanta of Code (QOC): {:.1}", result.total_score());
    let _ = writeln!(out, "AST Nodes:            {}", result.node_count());
    let _ = writeln!(out, "QOC/SLOC Ratio:       {:.2}", result.ratio);

    if detailed && !result.breakdown.is_empty() {
        let total = result.total_score();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<32} {:>8} {:>8} {:>12} {:>8}",
            "Node Type", "Count", "Weight", "QOC", "Share"
        );
        for (kind, stats) in result.breakdown.by_contribution() {
            let share = if total > 0.0 {
                stats.contribution / total * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{kind:<32} {:>8} {:>8.1} {:>12.1} {:>7.1}%",
                stats.count, stats.weight, stats.contribution, share
            );
        }
    }
}

fn render_file_table(out: &mut String, results: &[FileAnalysisResult]) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(
        out,
        "{:<30} {:<10} {:>8} {:>6} {:>6} {:>7} {:>7}",
        "File", "Language", "QOC", "LOC", "SLOC", "Nodes", "Ratio"
    );
    let _ = writeln!(out, "{rule}");
    for r in results {
        let _ = writeln!(
            out,
            "{:<30} {:<10} {:>8.1} {:>6} {:>6} {:>7} {:>7.2}",
            shorten(&r.path, 30),
            r.language.as_str(),
            r.total_score(),
            r.physical_lines,
            r.line_count,
            r.node_count(),
            r.ratio
        );
    }
    let _ = writeln!(out, "{rule}");
}

fn render_summary(out: &mut String, aggregate: &AggregateResult) {
    let _ = writeln!(out, "QOC Analysis Summary");
    let _ = writeln!(out, "  Total Files:          {}", aggregate.total_files);
    let _ = writeln!(out, "  Total QOC:            {:.1}", aggregate.total_score);
    let _ = writeln!(out, "  Total Lines of Code:  {}", aggregate.total_physical_lines);
    let _ = writeln!(out, "  Total Source Lines:   {}", aggregate.total_lines);
    let _ = writeln!(out, "  Total AST Nodes:      {}", aggregate.total_nodes);
    let _ = writeln!(out, "  Average QOC/SLOC:     {:.2}", aggregate.average_ratio);

    if aggregate.by_language.len() > 1 {
        let mut languages: Vec<_> = aggregate.by_language.iter().collect();
        languages.sort_by(|a, b| b.1.file_count.cmp(&a.1.file_count).then_with(|| a.0.cmp(b.0)));

        let _ = writeln!(out);
        let _ = writeln!(out, "Language Distribution");
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>10} {:>8} {:>8}",
            "Language", "Files", "QOC", "SLOC", "Share"
        );
        for (language, summary) in languages {
            let _ = writeln!(
                out,
                "{:<12} {:>6} {:>10.1} {:>8} {:>7.1}%",
                language.as_str(),
                summary.file_count,
                summary.score_subtotal,
                summary.line_subtotal,
                summary.percentage
            );
        }
    }
}

/// Keep the tail of long paths so the file name stays visible.
fn shorten(path: &str, width: usize) -> String {
    let chars = path.chars().count();
    if chars <= width {
        return path.to_string();
    }
    let tail: String = path.chars().skip(chars - (width - 3)).collect();
    format!("...{tail}")
}
