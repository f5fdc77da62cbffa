use quanta_core::aggregate::aggregate;
use quanta_core::analysis::{Analyzer, from_tree};
use quanta_core::compare::compare;
use quanta_core::error::QuantaError;
use quanta_core::pipeline::{BatchAnalyzer, FailurePolicy};
use quanta_core::render::{RenderOptions, ReportFormat, renderer_for};
use quanta_core::types::{LanguageId, Trend};
use quanta_core::weights::WeightTable;
use quanta_syntax::FixtureTree;
use quanta_test::{TestProject, builtin_weights, run_batch};

// ── Multi-language batch ─────────────────────────────────────────

#[test]
fn multi_language_batch_covers_every_grammar() {
    let project = TestProject::multi_language();
    let outcome = run_batch(project.path(), FailurePolicy::AbortOnFirst);

    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.results.len(), 7, "node_modules and README are skipped");

    let languages: Vec<&str> = outcome
        .aggregate
        .by_language
        .keys()
        .map(LanguageId::as_str)
        .collect();
    assert_eq!(
        languages,
        vec!["cpp", "go", "java", "javascript", "python", "rust", "typescript"]
    );

    for result in &outcome.results {
        assert!(result.total_score() > 0.0, "{} scored zero", result.path);
        assert!(result.line_count > 0);
        let expected = result.total_score() / result.line_count as f64;
        assert!((result.ratio - expected).abs() < 1e-9);
    }
}

#[test]
fn batch_results_keep_discovery_order() {
    let project = TestProject::multi_language();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);
    let paths: Vec<&str> = outcome.results.iter().map(|r| r.path.as_str()).collect();
    let mut sorted = paths.clone();
    sorted.sort_unstable();
    assert_eq!(paths, sorted);
}

#[test]
fn aggregate_matches_sum_of_results() {
    let project = TestProject::multi_language();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);
    let agg = &outcome.aggregate;

    let score: f64 = outcome.results.iter().map(|r| r.total_score()).sum();
    let lines: u64 = outcome.results.iter().map(|r| r.line_count).sum();
    let nodes: u64 = outcome.results.iter().map(|r| r.node_count()).sum();
    assert!((agg.total_score - score).abs() < 1e-6);
    assert_eq!(agg.total_lines, lines);
    assert_eq!(agg.total_nodes, nodes);
    assert_eq!(agg.total_files, 7);

    let share: f64 = agg.by_language.values().map(|s| s.percentage).sum();
    assert!((share - 100.0).abs() < 1e-6);

    // Re-aggregating the same results yields the same totals.
    assert_eq!(&aggregate(&outcome.results), agg);
}

#[test]
fn tsx_files_are_analyzed_with_typescript_weights() {
    let project = TestProject::typescript_with_jsx();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);

    assert!(outcome.errors.is_empty(), "errors: {:?}", outcome.errors);
    assert_eq!(outcome.results.len(), 2);
    let tsx = outcome
        .results
        .iter()
        .find(|r| r.path.ends_with("App.tsx"))
        .expect("tsx file analyzed");
    assert_eq!(tsx.language.as_str(), "typescript");
    assert!(tsx.breakdown.count("jsx_element") > 0);
    assert_eq!(outcome.aggregate.by_language.len(), 1);
    assert_eq!(
        outcome.aggregate.by_language[&LanguageId::new("typescript")].file_count,
        2
    );
}

// ── Failure handling ─────────────────────────────────────────────

#[test]
fn broken_file_is_skipped_and_empty_file_scores_root_only() {
    let project = TestProject::with_broken_file();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].path.ends_with("broken.py"));
    assert!(matches!(outcome.errors[0].error, QuantaError::ParseFailure(_)));

    let empty = outcome
        .results
        .iter()
        .find(|r| r.path.ends_with("empty.py"))
        .expect("empty file analyzed");
    assert_eq!(empty.line_count, 0);
    assert!(empty.ratio.abs() < f64::EPSILON);
    assert_eq!(empty.node_count(), 1);
    assert_eq!(empty.breakdown.count("module"), 1);
}

#[test]
fn abort_on_first_stops_at_broken_file() {
    let project = TestProject::with_broken_file();
    let weights = builtin_weights();
    let batch = BatchAnalyzer::new(Analyzer::new(&weights));
    let paths = vec![project.file("ok.py"), project.file("broken.py")];
    let err = batch
        .run(&paths, FailurePolicy::AbortOnFirst, &quanta_core::progress::NoopReporter)
        .unwrap_err();
    assert!(err.path.ends_with("broken.py"));
}

// ── Comparison ───────────────────────────────────────────────────

#[test]
fn refactor_comparison_increases_score() {
    let project = TestProject::before_after();
    let weights = builtin_weights();
    let batch = BatchAnalyzer::new(Analyzer::new(&weights));

    let before = batch.analyze_path(&project.file("before.py")).unwrap();
    let after = batch.analyze_path(&project.file("after.py")).unwrap();
    let cmp = compare(&before, &after);

    assert_eq!(cmp.trend(), Trend::Increased);
    assert_eq!(cmp.per_kind_count_delta["class_definition"], 1);
    assert_eq!(cmp.per_kind_count_delta["function_definition"], 1);
    assert!((cmp.score_delta - (after.total_score() - before.total_score())).abs() < 1e-9);

    let reverse = compare(&after, &before);
    assert_eq!(reverse.trend(), Trend::Decreased);
    assert!((reverse.score_delta + cmp.score_delta).abs() < 1e-9);
}

#[test]
fn comparison_renders_in_text_and_json() {
    let project = TestProject::before_after();
    let weights = builtin_weights();
    let batch = BatchAnalyzer::new(Analyzer::new(&weights));
    let before = batch.analyze_path(&project.file("before.py")).unwrap();
    let after = batch.analyze_path(&project.file("after.py")).unwrap();
    let cmp = compare(&before, &after);

    let text = renderer_for(ReportFormat::Text)
        .render_comparison(&before, &after, &cmp)
        .unwrap();
    assert!(text.contains("Conclusion: complexity increased"));

    let json = renderer_for(ReportFormat::Json)
        .render_comparison(&before, &after, &cmp)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["trend"], "increased");
}

// ── Reports over a real batch ────────────────────────────────────

#[test]
fn csv_report_has_one_row_per_file() {
    let project = TestProject::multi_language();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);
    let csv = renderer_for(ReportFormat::Csv)
        .render_batch(&outcome.results, &outcome.aggregate, RenderOptions::default())
        .unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "path,language,qoc,ast_nodes,loc,sloc,ratio");
    assert_eq!(lines.len(), 8);
}

#[test]
fn json_report_totals_match_aggregate() {
    let project = TestProject::multi_language();
    let outcome = run_batch(project.path(), FailurePolicy::SkipAndContinue);
    let json = renderer_for(ReportFormat::Json)
        .render_batch(
            &outcome.results,
            &outcome.aggregate,
            RenderOptions { detailed: true },
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["total_files"], 7);
    assert_eq!(value["summary"]["total_sloc"], outcome.aggregate.total_lines);
    assert_eq!(value["summary"]["total_loc"], outcome.aggregate.total_physical_lines);
    assert!(outcome.aggregate.total_physical_lines >= outcome.aggregate.total_lines);
    assert!(value["files"][0]["node_stats"].is_object());
}

// ── Fixture trees through the public API ─────────────────────────

#[test]
fn fixture_tree_scenario_scores_fifty() {
    let table = WeightTable::new(
        LanguageId::new("python"),
        [("function_definition", 10.0), ("class_definition", 15.0)],
        0.5,
    )
    .unwrap();

    let mut tree = FixtureTree::new("module");
    let root = tree.root_index().unwrap();
    let class = tree.push(root, "class_definition");
    tree.push(class, "function_definition");
    tree.push(class, "function_definition");
    // 1 root + 29 more leaves = 30 other nodes
    tree.push_leaves(class, "identifier", 29);

    let result = from_tree("scenario.py", &tree, &table, 10).unwrap();
    assert!((result.total_score() - 50.0).abs() < 1e-9);
    assert!((result.ratio - 5.0).abs() < 1e-9);
    assert_eq!(result.node_count(), 33);
}
