// CSV report, one row per file. Fields are quoted per RFC 4180 only when
// they contain a comma, quote or line break.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::error::Result;
use crate::types::{AggregateResult, FileAnalysisResult};

use super::{RenderOptions, Renderer};

pub const CSV_HEADER: &str = "path,language,qoc,ast_nodes,loc,sloc,ratio";

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

impl Renderer for CsvRenderer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn render_batch(
        &self,
        results: &[FileAnalysisResult],
        _aggregate: &AggregateResult,
        _options: RenderOptions,
    ) -> Result<String> {
        let mut out = String::with_capacity(64 * (results.len() + 1));
        let _ = writeln!(out, "{CSV_HEADER}");
        for r in results {
            let _ = writeln!(
                out,
                "{},{},{:.1},{},{},{},{:.2}",
                escape_field(&r.path),
                escape_field(r.language.as_str()),
                r.total_score(),
                r.node_count(),
                r.physical_lines,
                r.line_count,
                r.ratio
            );
        }
        Ok(out)
    }
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
