mod common;

use std::fs;

use common::TestWorkspace;
use sheet_filter::{
    config::FilterConfig,
    error::PipelineError,
    filter::Clause,
    loader::load_sheet,
    pipeline::{self, Outcome},
    report,
    sample,
};

fn config_for(workspace: &TestWorkspace) -> FilterConfig {
    FilterConfig {
        input: workspace.join("wenti.xlsx"),
        output: workspace.join("filtered_data.xlsx"),
        ..FilterConfig::default()
    }
}

#[test]
fn sample_run_writes_three_matches_in_order() {
    let workspace = TestWorkspace::new();
    let config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");

    let run = pipeline::run(&config).expect("run");
    assert_eq!(run.source_rows, 8);
    assert_eq!(run.source_columns, 7);
    assert_eq!(
        run.outcome,
        Outcome::Written {
            path: config.output.clone(),
            rows: 3
        }
    );

    let status = &run.distributions[0];
    assert_eq!(status.column, "处理状态");
    assert_eq!(status.entries[0].value, "定位分发");
    assert_eq!(status.entries[0].count, 4);

    let written = load_sheet(&config.output, "Sheet1").expect("reload output");
    assert_eq!(written.headers(), sample::SAMPLE_HEADERS);
    let ids: Vec<&str> = written.column_values("问题ID").unwrap().collect();
    assert_eq!(ids, vec!["DTS-001", "DTS-005", "DTS-007"]);
    assert_eq!(written.rows(), run.matches.as_ref().unwrap().rows());
}

#[test]
fn missing_owner_column_stops_before_writing() {
    let workspace = TestWorkspace::new();
    let config = config_for(&workspace);
    workspace.write_workbook(
        "wenti.xlsx",
        "DTS",
        &["问题ID", "问题标题", "处理状态", "负责人", "优先级", "创建时间", "描述"],
        &[vec!["DTS-001", "登录", "定位分发", "闵赛", "高", "2025-08-25", "无法登录"]],
    );

    let run = pipeline::run(&config).expect("run");
    let Outcome::MissingColumns(missing) = &run.outcome else {
        panic!("expected missing columns, got {:?}", run.outcome);
    };
    assert_eq!(missing.missing, vec!["领域责任人".to_string()]);
    assert_eq!(missing.available.len(), 7);
    assert!(run.matches.is_none());
    assert!(!config.output.exists());
    // Distributions still cover the columns that are present.
    assert_eq!(run.distributions.len(), 1);
}

#[test]
fn no_matches_leaves_existing_output_untouched() {
    let workspace = TestWorkspace::new();
    let mut config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");
    fs::write(&config.output, b"previous run").expect("seed output");
    config.clauses = vec![Clause::new("领域责任人", "nobody")];

    let run = pipeline::run(&config).expect("run");
    assert_eq!(run.outcome, Outcome::NoMatches);
    assert_eq!(run.match_count(), 0);
    assert_eq!(fs::read(&config.output).unwrap(), b"previous run");

    let rendered = report::render_run(&run, 0, 5);
    assert!(rendered.contains(report::NO_MATCHES_MESSAGE));
}

#[test]
fn no_matches_creates_no_file() {
    let workspace = TestWorkspace::new();
    let mut config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");
    config.clauses = vec![Clause::new("处理状态", "定位分发 ")];

    let run = pipeline::run(&config).expect("run");
    assert_eq!(run.outcome, Outcome::NoMatches);
    assert!(!config.output.exists());
}

#[test]
fn missing_input_fails_without_touching_output() {
    let workspace = TestWorkspace::new();
    let config = config_for(&workspace);
    fs::write(&config.output, b"keep me").expect("seed output");

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::FileNotFound { .. }));
    assert_eq!(fs::read(&config.output).unwrap(), b"keep me");
}

#[test]
fn existing_output_is_overwritten() {
    let workspace = TestWorkspace::new();
    let config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");
    fs::write(&config.output, b"stale").expect("seed output");

    pipeline::run(&config).expect("run");
    let written = load_sheet(&config.output, "Sheet1").expect("reload output");
    assert_eq!(written.row_count(), 3);
}

#[test]
fn unwritable_output_is_a_write_error() {
    let workspace = TestWorkspace::new();
    let mut config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");
    config.output = workspace.join("missing-dir").join("filtered_data.xlsx");

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Write { .. }), "{err:?}");
    assert!(!config.output.exists());
}

#[test]
fn extra_required_columns_are_validated() {
    let workspace = TestWorkspace::new();
    let mut config = config_for(&workspace);
    sample::write_sample_workbook(&config.input).expect("sample");
    config.required_columns = vec!["问题ID".to_string(), "处理人".to_string()];

    let run = pipeline::run(&config).expect("run");
    let Outcome::MissingColumns(missing) = run.outcome else {
        panic!("expected missing columns");
    };
    assert_eq!(missing.missing, vec!["处理人".to_string()]);
}

#[test]
fn output_cells_survive_the_write_read_boundary() {
    let workspace = TestWorkspace::new();
    let mut config = config_for(&workspace);
    workspace.write_workbook(
        "wenti.xlsx",
        "DTS",
        &["问题ID", "处理状态", "领域责任人", "描述"],
        &[
            vec!["007", "定位分发", "闵赛", "不修改"],
            vec!["1e3", "定位分发", "闵赛", "=SUM(A1)"],
            vec!["TRUE", "定位分发", "闵赛", "2025-08-25"],
        ],
    );
    config.analyze_columns = vec!["描述".to_string()];

    let run = pipeline::run(&config).expect("run");
    let written = load_sheet(&config.output, "Sheet1").expect("reload");
    assert_eq!(written.rows(), run.matches.as_ref().unwrap().rows());
    assert_eq!(written.cell(0, "问题ID"), Some("007"));
    assert_eq!(written.cell(1, "描述"), Some("=SUM(A1)"));
}
