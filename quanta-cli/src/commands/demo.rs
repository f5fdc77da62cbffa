use std::path::{Path, PathBuf};

use clap::Args;

use quanta_core::analysis::Analyzer;
use quanta_core::pipeline::{BatchAnalyzer, FailurePolicy, discover_files};
use quanta_core::progress::NoopReporter;
use quanta_core::render::{RenderOptions, Renderer, TextRenderer};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Directory to analyze (default: ./src, or . when there is none)
    pub path: Option<PathBuf>,
}

pub fn run(args: DemoArgs, options: GlobalOptions) -> anyhow::Result<()> {
    let root = args.path.unwrap_or_else(default_root);
    super::ensure_exists(&root)?;

    let config = super::load_config(None, &root)?;
    let weights = super::install_weights(&config)?;
    let analyzer = Analyzer::new(weights).with_node_cap(config.analysis.max_tree_nodes);
    let files = discover_files(&root, true, &config.discovery, analyzer.languages())?;

    if !options.quiet {
        println!("Analyzing {} ({} files)", root.display(), files.len());
        println!();
    }

    let outcome = BatchAnalyzer::new(analyzer).run(
        &files,
        FailurePolicy::SkipAndContinue,
        &NoopReporter,
    )?;
    let report = TextRenderer.render_batch(
        &outcome.results,
        &outcome.aggregate,
        RenderOptions::default(),
    )?;
    print!("{report}");

    if !options.quiet {
        if !outcome.errors.is_empty() {
            println!();
            println!(
                "{} files could not be analyzed (see the warnings above)",
                outcome.errors.len()
            );
        }
        println!();
        println!("Try these commands:");
        println!("  qoc analyze <file>            Analyze a single file");
        println!("  qoc analyze <directory> -r    Analyze a directory recursively");
        println!("  qoc analyze <file> -d         Show the per-node breakdown");
        println!("  qoc compare <before> <after>  Compare two files");
    }
    Ok(())
}

fn default_root() -> PathBuf {
    let src = Path::new("src");
    if src.is_dir() {
        src.to_path_buf()
    } else {
        PathBuf::from(".")
    }
}
