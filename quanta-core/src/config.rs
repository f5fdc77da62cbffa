use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ConfigError;
use crate::weights::WeightRegistry;

/// Weights shipped with the binary, merged under any user configuration.
const BUILTIN_WEIGHTS: &str = include_str!("default_weights.toml");

/// File names searched for by [`QuantaConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["quanta.toml", ".quanta.toml", "qoc.json"];

/// Top-level configuration, matching `quanta.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuantaConfig {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub discovery: DiscoverySection,
    #[serde(default)]
    pub languages: BTreeMap<String, LanguageWeights>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Stop a batch at the first file that fails instead of skipping it.
    #[serde(default)]
    pub fail_fast: bool,
    /// Refuse to score trees with more nodes than this.
    #[serde(default)]
    pub max_tree_nodes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySection {
    /// When non-empty, only files matching one of these globs are analyzed.
    #[serde(default)]
    pub include_patterns: Vec<String>,
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".into(),
        "**/vendor/**".into(),
        "**/target/**".into(),
        "**/.git/**".into(),
        "**/dist/**".into(),
        "**/build/**".into(),
        "**/__pycache__/**".into(),
    ]
}

/// Weight table for one language, as written in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageWeights {
    #[serde(default = "default_weight")]
    pub default_weight: f64,
    #[serde(default)]
    pub node_weights: BTreeMap<String, f64>,
}

impl Default for LanguageWeights {
    fn default() -> Self {
        Self {
            default_weight: default_weight(),
            node_weights: BTreeMap::new(),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

impl QuantaConfig {
    /// The built-in configuration: default sections plus shipped weights.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUILTIN_WEIGHTS, "<builtin>")
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read a config file (JSON when the extension is `.json`, TOML otherwise)
    /// and merge the built-in weights under it.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.display().to_string())
            } else {
                ConfigError::Invalid(format!("cannot read {}: {e}", path.display()))
            }
        })?;

        let origin = path.display().to_string();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let user = if is_json {
            Self::from_json_str(&content, &origin)?
        } else {
            Self::from_toml_str(&content, &origin)?
        };

        debug!(
            languages = user.languages.len(),
            fail_fast = user.analysis.fail_fast,
            "Loaded config"
        );
        user.with_builtin_weights()
    }

    /// First config file found directly inside `dir`.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Fill in built-in weight tables for languages this config leaves out.
    pub fn with_builtin_weights(mut self) -> Result<Self, ConfigError> {
        let builtin = Self::builtin()?;
        for (language, weights) in builtin.languages {
            let configured = self
                .languages
                .keys()
                .any(|k| k.trim().eq_ignore_ascii_case(&language));
            if !configured {
                self.languages.insert(language, weights);
            }
        }
        Ok(self)
    }

    /// Validate the weight tables and build the registry.
    pub fn weight_registry(&self) -> Result<WeightRegistry, ConfigError> {
        WeightRegistry::from_config(&self.languages)
    }
}
