use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use quanta_core::weights::{WeightRegistry, WeightTable};
use quanta_syntax::LanguageRegistry;

#[derive(Args, Debug)]
pub struct LanguagesArgs {
    /// Config file whose weight tables are listed (default: built-in weights)
    #[arg(long, env = "QOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the node weights of one language instead of the overview
    #[arg(long, value_name = "LANGUAGE")]
    pub weights: Option<String>,
}

pub fn run(args: LanguagesArgs) -> anyhow::Result<()> {
    let config = super::load_config(args.config.as_deref(), Path::new("."))?;
    let weights = super::install_weights(&config)?;
    let languages = LanguageRegistry::new();

    match args.weights {
        Some(language) => {
            let id = languages
                .get(&language.to_ascii_lowercase())
                .map_or(language.as_str(), |lang| lang.weights_language());
            let table = weights
                .resolve(id)
                .with_context(|| format!("No weight table for {language}"))?;
            print!("{}", render_weights(table));
        }
        None => print!("{}", render_table(&languages, weights)),
    }
    Ok(())
}

fn render_weights(table: &WeightTable) -> String {
    let mut out = format!("{:<40} {:>8}\n", "Node Type", "Weight");
    for (kind, weight) in table.explicit_weights() {
        out.push_str(&format!("{kind:<40} {weight:>8.1}\n"));
    }
    out.push_str(&format!(
        "{:<40} {:>8.1}\n",
        "(any other kind)",
        table.default_weight()
    ));
    out
}

fn render_table(languages: &LanguageRegistry, weights: &WeightRegistry) -> String {
    let mut out = format!(
        "{:<12} {:<36} {:>8} {:>8}\n",
        "Language", "Extensions", "Weights", "Default"
    );
    for id in languages.language_ids() {
        let extensions = languages
            .get(id)
            .map(|lang| {
                lang.extensions()
                    .iter()
                    .map(|ext| format!(".{ext}"))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let weights_id = languages.get(id).map_or(id, |lang| lang.weights_language());
        let line = match weights.resolve(weights_id) {
            Ok(table) => format!(
                "{id:<12} {extensions:<36} {:>8} {:>8.1}\n",
                table.len(),
                table.default_weight()
            ),
            Err(_) => format!("{id:<12} {extensions:<36} {:>8} {:>8}\n", "-", "-"),
        };
        out.push_str(&line);
    }

    let orphaned: Vec<_> = weights
        .languages()
        .into_iter()
        .filter(|id| languages.get(id.as_str()).is_none())
        .map(ToString::to_string)
        .collect();
    if !orphaned.is_empty() {
        out.push_str(&format!(
            "\nWeight tables without a grammar: {}\n",
            orphaned.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use quanta_core::config::{LanguageWeights, QuantaConfig};

    use super::*;

    #[test]
    fn lists_every_grammar_with_weights() {
        let weights = QuantaConfig::builtin().unwrap().weight_registry().unwrap();
        let table = render_table(&LanguageRegistry::new(), &weights);
        for id in ["cpp", "go", "java", "javascript", "python", "rust", "tsx", "typescript"] {
            assert!(table.contains(&format!("\n{id} ")), "missing {id}");
        }
        assert!(table.contains(".py .pyi"));
        let tsx = table.lines().find(|l| l.starts_with("tsx")).unwrap();
        assert!(!tsx.trim_end().ends_with('-'), "tsx borrows the typescript table");
        assert!(!table.contains("without a grammar"));
    }

    #[test]
    fn marks_missing_tables_and_orphans() {
        let languages = BTreeMap::from([("cobol".to_string(), LanguageWeights::default())]);
        let weights = WeightRegistry::from_config(&languages).unwrap();
        let table = render_table(&LanguageRegistry::new(), &weights);
        assert!(table.contains("Weight tables without a grammar: cobol"));
        let python = table.lines().find(|l| l.starts_with("python")).unwrap();
        assert!(python.trim_end().ends_with('-'));
    }

    #[test]
    fn weight_listing_is_sorted_with_default_last() {
        let table = WeightTable::new(
            "python".into(),
            [("function_definition", 10.0), ("class_definition", 15.0)],
            0.5,
        )
        .unwrap();
        let out = render_weights(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("class_definition"));
        assert!(lines[1].ends_with("15.0"));
        assert!(lines[2].starts_with("function_definition"));
        assert!(lines[3].starts_with("(any other kind)"));
        assert!(lines[3].ends_with("0.5"));
    }
}
