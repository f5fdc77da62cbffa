#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use crate::types::{AggregateResult, FileAnalysisResult, LanguageId, LanguageSummary, ratio};

/// Fold a batch of results into totals and a per-language distribution.
///
/// One pass over the results; an empty batch yields all zeros.
pub fn aggregate<'a, I>(results: I) -> AggregateResult
where
    I: IntoIterator<Item = &'a FileAnalysisResult>,
{
    let mut total_files = 0u64;
    let mut total_score = 0.0;
    let mut total_lines = 0u64;
    let mut total_physical_lines = 0u64;
    let mut total_nodes = 0u64;
    let mut by_language: BTreeMap<LanguageId, LanguageSummary> = BTreeMap::new();

    for result in results {
        total_files += 1;
        total_score += result.total_score();
        total_lines += result.line_count;
        total_physical_lines += result.physical_lines;
        total_nodes += result.node_count();

        let entry = by_language.entry(result.language.clone()).or_default();
        entry.file_count += 1;
        entry.score_subtotal += result.total_score();
        entry.line_subtotal += result.line_count;
    }

    for summary in by_language.values_mut() {
        summary.percentage = percent(summary.score_subtotal, total_score);
        summary.file_percentage = percent(summary.file_count as f64, total_files as f64);
    }

    AggregateResult {
        total_files,
        total_score,
        total_lines,
        total_physical_lines,
        total_nodes,
        average_ratio: ratio(total_score, total_lines),
        by_language,
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Breakdown;

    fn result(path: &str, language: &str, lines: u64, nodes: u64, weight: f64) -> FileAnalysisResult {
        let breakdown = Breakdown::from_counts(vec![("node".to_string(), nodes)], |_| weight);
        FileAnalysisResult::new(path, LanguageId::new(language), lines, breakdown)
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let agg = aggregate(std::iter::empty::<&FileAnalysisResult>());
        assert_eq!(agg, AggregateResult::default());
        assert_eq!(agg.total_files, 0);
        assert!(agg.total_score.abs() < f64::EPSILON);
        assert!(agg.average_ratio.abs() < f64::EPSILON);
        assert!(agg.by_language.is_empty());
    }

    #[test]
    fn single_result_mirrors_its_values() {
        let r = result("a.py", "python", 8, 20, 2.0);
        let agg = aggregate([&r]);
        assert_eq!(agg.total_files, 1);
        assert!((agg.total_score - r.total_score()).abs() < f64::EPSILON);
        assert_eq!(agg.total_lines, r.line_count);
        assert_eq!(agg.total_nodes, 20);
        assert!((agg.average_ratio - r.ratio).abs() < f64::EPSILON);
        assert_eq!(agg.by_language.len(), 1);
        let python = &agg.by_language[&LanguageId::new("python")];
        assert!((python.percentage - 100.0).abs() < f64::EPSILON);
        assert!((python.file_percentage - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_ratio_is_global_not_mean_of_files() {
        // 10/1 and 10/99: mean of ratios is 5.05, global ratio is 20/100.
        let small = result("small.py", "python", 1, 10, 1.0);
        let large = result("large.py", "python", 99, 10, 1.0);
        let agg = aggregate([&small, &large]);
        assert!((agg.average_ratio - 0.2).abs() < 1e-12);
    }

    #[test]
    fn language_distribution() {
        let results = vec![
            result("a.py", "python", 10, 30, 1.0),
            result("b.py", "python", 10, 10, 1.0),
            result("C.java", "java", 5, 60, 1.0),
        ];
        let agg = aggregate(&results);

        assert_eq!(agg.total_files, 3);
        assert!((agg.total_score - 100.0).abs() < 1e-9);
        assert_eq!(agg.total_lines, 25);
        assert!((agg.average_ratio - 4.0).abs() < 1e-9);

        let python = &agg.by_language[&LanguageId::new("python")];
        assert_eq!(python.file_count, 2);
        assert!((python.score_subtotal - 40.0).abs() < 1e-9);
        assert_eq!(python.line_subtotal, 20);
        assert!((python.percentage - 40.0).abs() < 1e-9);
        let java = &agg.by_language[&LanguageId::new("java")];
        assert!((java.percentage - 60.0).abs() < 1e-9);
        assert!((java.file_percentage - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn physical_lines_are_totalled_separately() {
        let a = result("a.py", "python", 2, 4, 1.0).with_physical_lines(5);
        let b = result("b.py", "python", 3, 4, 1.0).with_physical_lines(4);
        let agg = aggregate([&a, &b]);
        assert_eq!(agg.total_lines, 5);
        assert_eq!(agg.total_physical_lines, 9);
        assert!((agg.average_ratio - 8.0 / 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_score_batch_has_zero_percentages() {
        let r = result("empty.py", "python", 0, 0, 1.0);
        let agg = aggregate([&r]);
        assert!(agg.by_language[&LanguageId::new("python")].percentage.abs() < f64::EPSILON);
        assert!(agg.average_ratio.abs() < f64::EPSILON);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_results() -> impl Strategy<Value = Vec<FileAnalysisResult>> {
            proptest::collection::vec(
                (0usize..3, 0u64..200, 0u64..500, 0.0f64..10.0).prop_map(|(lang, lines, nodes, w)| {
                    let language = ["python", "java", "cpp"][lang];
                    result("f", language, lines, nodes, w)
                }),
                0..30,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn language_subtotals_add_up(results in arb_results()) {
                let agg = aggregate(&results);
                let files: u64 = agg.by_language.values().map(|s| s.file_count).sum();
                let lines: u64 = agg.by_language.values().map(|s| s.line_subtotal).sum();
                prop_assert_eq!(files, results.len() as u64);
                prop_assert_eq!(lines, agg.total_lines);

                if agg.total_score > 0.0 {
                    let pct: f64 = agg.by_language.values().map(|s| s.percentage).sum();
                    prop_assert!((pct - 100.0).abs() < 1e-6);
                }
            }
        }
    }
}
