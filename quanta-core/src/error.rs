use quanta_syntax::SyntaxError;

/// Top-level Quanta error type.
///
/// All fallible operations in `quanta-core` return [`Result<T, QuantaError>`](Result).
/// The first four variants are the scoring engine's own failure modes; `Io`
/// and `Render` only come out of the batch and report layers.
#[derive(thiserror::Error, Debug)]
pub enum QuantaError {
    /// No weight table or grammar is registered for the language.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Weight configuration was rejected while building the registry.
    #[error("Invalid weight configuration: {0}")]
    InvalidWeightConfig(#[from] ConfigError),

    /// The parser could not produce an error-free tree.
    #[error("Parse failure: {0}")]
    ParseFailure(SyntaxError),

    /// Traversal met a structure that is not a finite tree (cycle, shared
    /// subtree, or more nodes than the tree claims to hold).
    #[error("Malformed tree: {0}")]
    MalformedTree(String),

    /// A source file could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path of the file that failed to read.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Report rendering failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl From<SyntaxError> for QuantaError {
    fn from(err: SyntaxError) -> Self {
        match err {
            SyntaxError::UnsupportedLanguage(lang) => Self::UnsupportedLanguage(lang),
            other => Self::ParseFailure(other),
        }
    }
}

/// Errors in configuration loading and weight validation.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist at the expected path.
    #[error("Config file not found: {0}")]
    NotFound(String),

    /// Configuration file syntax could not be parsed (TOML or JSON error).
    #[error("Cannot parse config {path}: {message}")]
    Parse {
        /// Path (or origin label) of the configuration source.
        path: String,
        /// Description of the syntax error.
        message: String,
    },

    /// A weight below zero.
    #[error("Negative weight {weight} for `{kind}` in language {language}")]
    NegativeWeight {
        language: String,
        kind: String,
        weight: f64,
    },

    /// A NaN or infinite weight.
    #[error("Non-finite weight for `{kind}` in language {language}")]
    NonFiniteWeight { language: String, kind: String },

    /// Two weight tables for the same language.
    #[error("Language {0} is registered more than once")]
    DuplicateLanguage(String),

    /// The process-wide registry was installed twice.
    #[error("Weight registry is already installed")]
    AlreadyInstalled,

    /// Configuration values are present but semantically invalid.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Errors from report rendering.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    /// The format has no rendering for this kind of report.
    #[error("{format} output does not support {report} reports")]
    Unsupported {
        format: &'static str,
        report: &'static str,
    },

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, QuantaError>`.
pub type Result<T> = std::result::Result<T, QuantaError>;
