//! Quanta of Code core library: weight tables, tree scoring, comparison,
//! aggregation, batch analysis and reports.
//!
//! Scoring walks a syntax tree once and sums a per-language weight for every
//! node kind it meets. [`analysis::Analyzer`] handles one unit of source,
//! [`pipeline::BatchAnalyzer`] handles many files in parallel, and
//! [`render`] turns results into text, JSON or CSV.

pub mod aggregate;
pub mod analysis;
pub mod compare;
pub mod config;
pub mod error;
pub mod lines;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod score;
pub mod types;
pub mod weights;

pub use aggregate::aggregate;
pub use analysis::Analyzer;
pub use compare::compare;
pub use config::QuantaConfig;
pub use error::{ConfigError, QuantaError, RenderError, Result};
pub use pipeline::{BatchAnalyzer, BatchOutcome, FailurePolicy, FileError, discover_files};
pub use score::score;
pub use types::{AggregateResult, Breakdown, ComparisonResult, FileAnalysisResult, LanguageId};
pub use weights::{WeightRegistry, WeightTable};
