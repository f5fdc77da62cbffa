use std::io::ErrorKind;

use clap::Parser;

use quanta_core::{ConfigError, QuantaError};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "qoc",
    version,
    about = "Quanta of Code: weigh source files by the syntax nodes they contain"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Map an error to the process exit code.
///
///   0: success
///   1: general error
///   2: configuration error
///   3: path not found
///   4: parse failure
///   5: unsupported language
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(err) = cause.downcast_ref::<QuantaError>() {
            return match err {
                QuantaError::InvalidWeightConfig(_) => 2,
                QuantaError::Io { source, .. } if source.kind() == ErrorKind::NotFound => 3,
                QuantaError::ParseFailure(_) | QuantaError::MalformedTree(_) => 4,
                QuantaError::UnsupportedLanguage(_) => 5,
                _ => 1,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return 2;
        }
    }
    1
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    let options = commands::GlobalOptions { quiet: cli.quiet };
    match commands::run(cli.command, options) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}
