use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use quanta_core::analysis::Analyzer;
use quanta_core::pipeline::{BatchAnalyzer, FailurePolicy, discover_files};
use quanta_core::progress::{IndicatifReporter, NoopReporter, ProgressReporter};
use quanta_core::render::{RenderOptions, ReportFormat, renderer_for};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File or directory to analyze
    pub path: PathBuf,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Show the per-node-kind breakdown
    #[arg(short, long)]
    pub detailed: bool,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: text, json, csv
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Config file (default: quanta.toml next to the analyzed path)
    #[arg(long, env = "QOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Stop at the first file that fails
    #[arg(long)]
    pub fail_fast: bool,
}

pub fn run(args: AnalyzeArgs, options: GlobalOptions) -> anyhow::Result<()> {
    super::ensure_exists(&args.path)?;
    let config = super::load_config(args.config.as_deref(), &args.path)?;
    let weights = super::install_weights(&config)?;

    let analyzer = Analyzer::new(weights).with_node_cap(config.analysis.max_tree_nodes);
    let files = discover_files(
        &args.path,
        args.recursive,
        &config.discovery,
        analyzer.languages(),
    )
    .with_context(|| format!("Cannot collect files under {}", args.path.display()))?;

    if files.is_empty() {
        anyhow::bail!("No supported files found in {}", args.path.display());
    }

    let policy = FailurePolicy::from_fail_fast(args.fail_fast || config.analysis.fail_fast);
    let show_progress = !options.quiet && files.len() > 1;
    let progress = IndicatifReporter::new();
    let reporter: &dyn ProgressReporter = if show_progress { &progress } else { &NoopReporter };

    let batch = BatchAnalyzer::new(analyzer);
    let outcome = batch.run(&files, policy, reporter)?;

    // Nothing analyzed and something failed: surface the failure itself.
    if outcome.results.is_empty() {
        if let Some(first) = outcome.errors.into_iter().next() {
            return Err(first.into());
        }
    }

    let renderer = renderer_for(args.format);
    let report = renderer.render_batch(
        &outcome.results,
        &outcome.aggregate,
        RenderOptions {
            detailed: args.detailed,
        },
    )?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Cannot write report: {}", path.display()))?;
            info!(path = %path.display(), format = %args.format, "Report written");
            if !options.quiet {
                eprintln!("Results saved to: {}", path.display());
            }
        }
        None => print!("{report}"),
    }

    Ok(())
}
