//! Report renderers: plain text for terminals, JSON and CSV for tooling.

pub mod csv;
pub mod json;
pub mod text;

use std::fmt;
use std::str::FromStr;

use crate::error::{RenderError, Result};
use crate::types::{AggregateResult, ComparisonResult, FileAnalysisResult};

pub use self::csv::CsvRenderer;
pub use self::json::JsonRenderer;
pub use self::text::TextRenderer;

/// Output format of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "console" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown format `{other}` (expected text, json or csv)")),
        }
    }
}

/// Knobs shared by all renderers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Include per-kind statistics for every file.
    pub detailed: bool,
}

/// Common interface for report generators.
pub trait Renderer: Send + Sync {
    /// Format name, as accepted by `--format`.
    fn name(&self) -> &'static str;

    /// Render per-file results followed by the batch summary.
    fn render_batch(
        &self,
        results: &[FileAnalysisResult],
        aggregate: &AggregateResult,
        options: RenderOptions,
    ) -> Result<String>;

    /// Render a two-file comparison.
    fn render_comparison(
        &self,
        _before: &FileAnalysisResult,
        _after: &FileAnalysisResult,
        _comparison: &ComparisonResult,
    ) -> Result<String> {
        Err(RenderError::Unsupported {
            format: self.name(),
            report: "comparison",
        }
        .into())
    }
}

/// The renderer for `format`.
pub fn renderer_for(format: ReportFormat) -> Box<dyn Renderer> {
    match format {
        ReportFormat::Text => Box::new(TextRenderer),
        ReportFormat::Json => Box::new(JsonRenderer),
        ReportFormat::Csv => Box::new(CsvRenderer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::error::QuantaError;
    use crate::types::{Breakdown, LanguageId};

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("console".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("xml".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn format_display_roundtrips() {
        for format in [ReportFormat::Text, ReportFormat::Json, ReportFormat::Csv] {
            assert_eq!(format.to_string().parse::<ReportFormat>().unwrap(), format);
            assert_eq!(renderer_for(format).name(), format.as_str());
        }
    }

    #[test]
    fn csv_has_no_comparison_report() {
        let r = FileAnalysisResult::new(
            "a.py",
            LanguageId::new("python"),
            1,
            Breakdown::from_counts(vec![("module".to_string(), 1)], |_| 1.0),
        );
        let cmp = compare(&r, &r);
        let err = renderer_for(ReportFormat::Csv)
            .render_comparison(&r, &r, &cmp)
            .unwrap_err();
        assert!(matches!(
            err,
            QuantaError::Render(RenderError::Unsupported { format: "csv", .. })
        ));
    }
}
