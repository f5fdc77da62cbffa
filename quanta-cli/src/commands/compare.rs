use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use quanta_core::analysis::Analyzer;
use quanta_core::compare::compare;
use quanta_core::pipeline::BatchAnalyzer;
use quanta_core::render::{ReportFormat, renderer_for};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline file
    pub before: PathBuf,

    /// File compared against the baseline
    pub after: PathBuf,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Config file (default: quanta.toml next to the baseline)
    #[arg(long, env = "QOC_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn run(args: CompareArgs, _options: GlobalOptions) -> anyhow::Result<()> {
    super::ensure_exists(&args.before)?;
    super::ensure_exists(&args.after)?;

    let config = super::load_config(args.config.as_deref(), &args.before)?;
    let weights = super::install_weights(&config)?;
    let batch = BatchAnalyzer::new(
        Analyzer::new(weights).with_node_cap(config.analysis.max_tree_nodes),
    );

    let before = batch
        .analyze_path(&args.before)
        .with_context(|| format!("Cannot analyze {}", args.before.display()))?;
    let after = batch
        .analyze_path(&args.after)
        .with_context(|| format!("Cannot analyze {}", args.after.display()))?;

    let comparison = compare(&before, &after);
    let report = renderer_for(args.format).render_comparison(&before, &after, &comparison)?;
    print!("{report}");
    Ok(())
}
