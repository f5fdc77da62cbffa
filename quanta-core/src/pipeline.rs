// Batch orchestration: discover source files, analyze them in parallel,
// fold the results. Per-file failures are either collected or fatal,
// depending on the `FailurePolicy`.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use quanta_syntax::LanguageRegistry;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::analysis::Analyzer;
use crate::config::DiscoverySection;
use crate::error::{ConfigError, QuantaError, Result};
use crate::lines::count_lines;
use crate::progress::ProgressReporter;
use crate::types::{AggregateResult, FileAnalysisResult};

// ── Discovery ──────────────────────────────────────────────────────

/// Collect the analyzable files under `root`.
///
/// A file path is returned as-is when its extension maps to a grammar. A
/// directory is listed (recursively when `recursive` is set), filtered by the
/// include/exclude globs matched against paths relative to `root`, and
/// sorted.
#[instrument(skip(root, discovery, languages), fields(root = %root.display()))]
pub fn discover_files(
    root: &Path,
    recursive: bool,
    discovery: &DiscoverySection,
    languages: &LanguageRegistry,
) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(QuantaError::Io {
            path: root.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
        });
    }

    if root.is_file() {
        if languages.for_file(root).is_none() {
            return Err(QuantaError::UnsupportedLanguage(describe_extension(root)));
        }
        return Ok(vec![root.to_path_buf()]);
    }

    let includes = compile_patterns(&discovery.include_patterns)?;
    let excludes = compile_patterns(&discovery.exclude_patterns)?;

    let suffix = if recursive { "**/*" } else { "*" };
    let pattern = format!("{}/{suffix}", Pattern::escape(&root.to_string_lossy()));
    let entries = glob::glob(&pattern)
        .map_err(|e| ConfigError::Invalid(format!("cannot list {}: {e}", root.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !path.is_file() || languages.for_file(&path).is_none() {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if !includes.is_empty() && !matches_any(&includes, relative) {
            continue;
        }
        if matches_any(&excludes, relative) {
            debug!(path = %relative.display(), "Excluded by pattern");
            continue;
        }
        files.push(path);
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "Discovered files");
    Ok(files)
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                QuantaError::from(ConfigError::Invalid(format!("bad glob pattern `{p}`: {e}")))
            })
        })
        .collect()
}

fn matches_any(patterns: &[Pattern], path: &Path) -> bool {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };
    patterns.iter().any(|p| p.matches_path_with(path, options))
}

fn describe_extension(path: &Path) -> String {
    path.extension().map_or_else(
        || path.display().to_string(),
        |ext| format!(".{}", ext.to_string_lossy()),
    )
}

// ── Batch analysis ─────────────────────────────────────────────────

/// What a batch does when one file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure and keep going.
    #[default]
    SkipAndContinue,
    /// Stop and return the first failure.
    AbortOnFirst,
}

impl FailurePolicy {
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            Self::AbortOnFirst
        } else {
            Self::SkipAndContinue
        }
    }
}

/// A failure tied to the file that caused it.
#[derive(thiserror::Error, Debug)]
#[error("failed to analyze {}", .path.display())]
pub struct FileError {
    pub path: PathBuf,
    #[source]
    pub error: QuantaError,
}

/// Everything a batch run produced.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful results, in input order.
    pub results: Vec<FileAnalysisResult>,
    /// Skipped files, in input order.
    pub errors: Vec<FileError>,
    pub aggregate: AggregateResult,
}

/// Reads and analyzes files, one rayon task per file.
#[derive(Debug)]
pub struct BatchAnalyzer<'w> {
    analyzer: Analyzer<'w>,
}

impl<'w> BatchAnalyzer<'w> {
    pub fn new(analyzer: Analyzer<'w>) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &Analyzer<'w> {
        &self.analyzer
    }

    /// Read one file and analyze it. The ratio denominator is the number of
    /// non-blank lines.
    pub fn analyze_path(&self, path: &Path) -> Result<FileAnalysisResult> {
        let language = self
            .analyzer
            .languages()
            .for_file(path)
            .ok_or_else(|| QuantaError::UnsupportedLanguage(describe_extension(path)))?;

        let source = std::fs::read_to_string(path).map_err(|e| QuantaError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let lines = count_lines(&source);

        let result = self.analyzer.analyze(
            &path.display().to_string(),
            &source,
            language.id(),
            lines.source,
        )?
        .with_physical_lines(lines.physical);
        debug!(
            path = %path.display(),
            language = language.id(),
            score = result.total_score(),
            nodes = result.node_count(),
            "Analyzed file"
        );
        Ok(result)
    }

    /// Analyze every path in parallel.
    ///
    /// With `AbortOnFirst` the first failure is returned and no outcome is
    /// produced; with `SkipAndContinue` failures land in `BatchOutcome::errors`.
    #[instrument(skip_all, fields(files = paths.len(), ?policy))]
    pub fn run(
        &self,
        paths: &[PathBuf],
        policy: FailurePolicy,
        reporter: &dyn ProgressReporter,
    ) -> std::result::Result<BatchOutcome, FileError> {
        reporter.start("Analyzing", Some(paths.len() as u64));

        let analyze_one = |path: &PathBuf| {
            let outcome = self.analyze_path(path).map_err(|error| FileError {
                path: path.clone(),
                error,
            });
            reporter.advance(1);
            outcome
        };

        let (results, errors) = match policy {
            FailurePolicy::AbortOnFirst => {
                let collected: std::result::Result<Vec<_>, FileError> =
                    paths.par_iter().map(analyze_one).collect();
                match collected {
                    Ok(results) => (results, Vec::new()),
                    Err(e) => {
                        reporter.finish();
                        warn!(path = %e.path.display(), error = %e.error, "Aborting batch");
                        return Err(e);
                    }
                }
            }
            FailurePolicy::SkipAndContinue => {
                let outcomes: Vec<_> = paths.par_iter().map(analyze_one).collect();
                let mut results = Vec::with_capacity(outcomes.len());
                let mut errors = Vec::new();
                for outcome in outcomes {
                    match outcome {
                        Ok(result) => results.push(result),
                        Err(e) => {
                            warn!(path = %e.path.display(), error = %e.error, "Skipping file");
                            errors.push(e);
                        }
                    }
                }
                (results, errors)
            }
        };
        reporter.finish();

        let aggregate = aggregate(&results);
        info!(
            analyzed = results.len(),
            skipped = errors.len(),
            total_score = aggregate.total_score,
            total_lines = aggregate.total_lines,
            "Batch complete"
        );

        Ok(BatchOutcome {
            results,
            errors,
            aggregate,
        })
    }
}
