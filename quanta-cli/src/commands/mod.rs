pub mod analyze;
pub mod compare;
pub mod demo;
pub mod languages;

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use tracing::debug;

use quanta_core::config::QuantaConfig;
use quanta_core::weights::{self, WeightRegistry};
use quanta_core::QuantaError;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a file or directory
    Analyze(analyze::AnalyzeArgs),
    /// Compare the scores of two files
    Compare(compare::CompareArgs),
    /// Analyze the current project and print a summary
    Demo(demo::DemoArgs),
    /// List supported languages and their weight tables
    Languages(languages::LanguagesArgs),
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    pub quiet: bool,
}

pub fn run(cmd: Command, options: GlobalOptions) -> anyhow::Result<()> {
    match cmd {
        Command::Analyze(args) => analyze::run(args, options),
        Command::Compare(args) => compare::run(args, options),
        Command::Demo(args) => demo::run(args, options),
        Command::Languages(args) => languages::run(args),
    }
}

/// Load the explicit config file, or the first one found next to `target`,
/// or fall back to the built-in weights.
pub(crate) fn load_config(explicit: Option<&Path>, target: &Path) -> anyhow::Result<QuantaConfig> {
    if let Some(path) = explicit {
        return QuantaConfig::load(path)
            .with_context(|| format!("Cannot load config: {}", path.display()));
    }

    let search_dir = if target.is_dir() {
        target
    } else {
        target.parent().unwrap_or_else(|| Path::new("."))
    };
    let search_dir = if search_dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        search_dir
    };

    match QuantaConfig::discover(search_dir) {
        Some(found) => {
            debug!(path = %found.display(), "Using discovered config");
            QuantaConfig::load(&found)
                .with_context(|| format!("Cannot load config: {}", found.display()))
        }
        None => QuantaConfig::builtin().context("Cannot load built-in weights"),
    }
}

/// Validate the configured weights and install them process-wide.
pub(crate) fn install_weights(config: &QuantaConfig) -> anyhow::Result<&'static WeightRegistry> {
    let registry = config
        .weight_registry()
        .map_err(QuantaError::from)
        .context("Invalid weight configuration")?;
    Ok(weights::install(registry)?)
}

/// Fail with a not-found error before any language detection happens.
pub(crate) fn ensure_exists(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        return Ok(());
    }
    Err(QuantaError::Io {
        path: path.display().to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Cannot load config"));
    }

    #[test]
    fn discovers_config_next_to_target_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quanta.toml"), "[analysis]\nfail_fast = true\n").unwrap();
        let target = dir.path().join("main.py");
        let config = load_config(None, &target).unwrap();
        assert!(config.analysis.fail_fast);
    }

    #[test]
    fn falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(None, dir.path()).unwrap();
        assert!(!config.analysis.fail_fast);
        assert!(config.languages.contains_key("python"));
    }

    #[test]
    fn ensure_exists_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_exists(&dir.path().join("gone.py")).unwrap_err();
        let quanta = err.downcast_ref::<QuantaError>().unwrap();
        assert!(matches!(quanta, QuantaError::Io { .. }));
        assert!(ensure_exists(dir.path()).is_ok());
    }
}
