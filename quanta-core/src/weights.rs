// Per-language weight tables and the registry that resolves them.
//
// The registry is built once from configuration and never mutated afterwards.
// A process-wide copy can be installed into a `OnceLock`; installation must
// happen before any reader calls `global()`.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::LanguageWeights;
use crate::error::{ConfigError, QuantaError, Result};
use crate::types::LanguageId;

/// Immutable mapping from node kind to weight for one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTable {
    language: LanguageId,
    node_weights: HashMap<String, f64>,
    default_weight: f64,
}

impl WeightTable {
    /// Build a validated table. Rejects negative or non-finite weights and
    /// repeated node kinds.
    pub fn new<I, K>(
        language: LanguageId,
        node_weights: I,
        default_weight: f64,
    ) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        validate_weight(&language, "default_weight", default_weight)?;

        let mut weights = HashMap::new();
        for (kind, weight) in node_weights {
            let kind = kind.into();
            validate_weight(&language, &kind, weight)?;
            if weights.insert(kind.clone(), weight).is_some() {
                return Err(ConfigError::Invalid(format!(
                    "node kind `{kind}` listed twice for language {language}"
                )));
            }
        }

        Ok(Self {
            language,
            node_weights: weights,
            default_weight,
        })
    }

    /// A table with no explicit entries: every kind weighs `default_weight`.
    pub fn uniform(
        language: LanguageId,
        default_weight: f64,
    ) -> std::result::Result<Self, ConfigError> {
        Self::new(language, Vec::<(String, f64)>::new(), default_weight)
    }

    pub fn from_config(
        language: &str,
        config: &LanguageWeights,
    ) -> std::result::Result<Self, ConfigError> {
        Self::new(
            LanguageId::new(language),
            config.node_weights.iter().map(|(k, w)| (k.clone(), *w)),
            config.default_weight,
        )
    }

    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Weight for `kind`, falling back to the default for unlisted kinds.
    pub fn weight_for(&self, kind: &str) -> f64 {
        self.node_weights
            .get(kind)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Explicit entries, sorted by kind.
    pub fn explicit_weights(&self) -> BTreeMap<&str, f64> {
        self.node_weights
            .iter()
            .map(|(k, w)| (k.as_str(), *w))
            .collect()
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.node_weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_weights.is_empty()
    }
}

fn validate_weight(
    language: &LanguageId,
    kind: &str,
    weight: f64,
) -> std::result::Result<(), ConfigError> {
    if !weight.is_finite() {
        return Err(ConfigError::NonFiniteWeight {
            language: language.to_string(),
            kind: kind.to_string(),
        });
    }
    if weight < 0.0 {
        return Err(ConfigError::NegativeWeight {
            language: language.to_string(),
            kind: kind.to_string(),
            weight,
        });
    }
    Ok(())
}

/// Read-only collection of weight tables keyed by language.
#[derive(Debug, Clone, Default)]
pub struct WeightRegistry {
    tables: HashMap<LanguageId, WeightTable>,
}

impl WeightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `languages.<id>` configuration entries.
    ///
    /// Identifiers differing only in case count as the same language and are
    /// reported as duplicates.
    pub fn from_config(
        languages: &BTreeMap<String, LanguageWeights>,
    ) -> std::result::Result<Self, ConfigError> {
        let mut registry = Self::new();
        for (language, weights) in languages {
            registry.register(WeightTable::from_config(language, weights)?)?;
        }
        Ok(registry)
    }

    /// Add a table. A second table for the same language is an error.
    pub fn register(&mut self, table: WeightTable) -> std::result::Result<(), ConfigError> {
        if self.tables.contains_key(table.language()) {
            return Err(ConfigError::DuplicateLanguage(table.language().to_string()));
        }
        self.tables.insert(table.language().clone(), table);
        Ok(())
    }

    /// Look up the table for `language`.
    pub fn resolve(&self, language: &str) -> Result<&WeightTable> {
        self.tables
            .get(&LanguageId::new(language))
            .ok_or_else(|| QuantaError::UnsupportedLanguage(language.to_string()))
    }

    /// Registered languages, sorted.
    pub fn languages(&self) -> Vec<&LanguageId> {
        let mut ids: Vec<_> = self.tables.keys().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

static GLOBAL_REGISTRY: OnceLock<WeightRegistry> = OnceLock::new();

/// Install the process-wide registry. Only the first call succeeds.
pub fn install(registry: WeightRegistry) -> std::result::Result<&'static WeightRegistry, ConfigError> {
    let mut slot = Some(registry);
    let installed = GLOBAL_REGISTRY.get_or_init(|| slot.take().unwrap_or_default());
    if slot.is_some() {
        return Err(ConfigError::AlreadyInstalled);
    }
    Ok(installed)
}

/// The process-wide registry, if one has been installed.
pub fn global() -> Option<&'static WeightRegistry> {
    GLOBAL_REGISTRY.get()
}
