mod common;

use std::fs;

use allure_docx::commands::generate::{GenerateOptions, execute};
use allure_docx::core::aggregate::aggregate;
use allure_docx::core::loader::load_results_dir;
use allure_docx::core::models::Status;
use allure_docx::core::summary::SessionSummary;

use common::{sample_container, sample_result, write_container, write_result};

fn options(allure_dir: &std::path::Path, output: &std::path::Path) -> GenerateOptions {
    GenerateOptions {
        allure_dir: allure_dir.to_path_buf(),
        output: output.to_path_buf(),
        config: "standard".to_string(),
        title: None,
        logo: None,
        logo_height_cm: None,
        pdf: false,
        fail_if_empty: false,
    }
}

/// Seeds a small session in a temp directory: two passed tests, one failed
/// test with a rerun, and one container owning the failed test.
fn seed_session(dir: &std::path::Path) {
    write_result(
        dir,
        "aaa",
        &sample_result("u-1", "h-1", "login works", "passed", 1_000, 3_000),
    );
    write_result(
        dir,
        "bbb",
        &sample_result("u-2", "h-2", "logout works", "passed", 3_000, 5_000),
    );
    // Earlier execution of the failing test, superseded by the rerun below.
    write_result(
        dir,
        "ccc",
        &sample_result("u-3", "h-3", "checkout fails", "broken", 5_000, 6_000),
    );
    write_result(
        dir,
        "ddd",
        &sample_result("u-4", "h-3", "checkout fails", "failed", 7_000, 9_000),
    );
    write_container(dir, "eee", &sample_container("c-1", &["u-4"], 500, 900));
}

/// End-to-end pipeline over the seeded session: three retained tests, the
/// failed one listed first, shares of 66.67% / 33.33%, and time bounds
/// widened by the container's setup fixture.
///
/// 对种子会话的端到端流水线：保留三个测试，失败的排在最前，
/// 份额为 66.67% / 33.33%，时间窗口被容器的前置 fixture 扩展。
#[test]
fn test_pipeline_over_a_small_session() {
    let dir = tempfile::tempdir().unwrap();
    seed_session(dir.path());

    let (results, containers) = load_results_dir(dir.path()).unwrap();
    assert_eq!(results.len(), 4);
    let (entries, stats) = aggregate(results, containers);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.counts.get(Status::Passed), 2);
    assert_eq!(stats.counts.get(Status::Failed), 1);
    assert_eq!(stats.counts.get(Status::Broken), 0);

    assert_eq!(entries[0].name, "checkout fails");
    assert_eq!(entries[0].result.uuid, "u-4");
    assert_eq!(entries[0].parents.len(), 1);

    // Fixture start 500 predates every test; afters stop at 905.
    assert_eq!(stats.bounds.start, Some(500));
    assert_eq!(stats.bounds.stop, Some(9_000));

    let summary = SessionSummary::from_stats(&stats);
    assert_eq!(summary.percentage_of(Status::Passed), "66.67%");
    assert_eq!(summary.percentage_of(Status::Failed), "33.33%");
    assert_eq!(summary.duration_text, "8s");
}

/// The generate command writes a well-formed docx file (a ZIP container) at
/// the requested path and nothing else next to it.
///
/// 生成命令在请求的路径写出一个格式正确的 docx 文件（ZIP 容器），
/// 且不会在旁边留下其他文件。
#[test]
fn test_generate_writes_a_docx_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    seed_session(dir.path());

    let output = out_dir.path().join("report.docx");
    execute(options(dir.path(), &output)).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"PK"), "docx output must be a ZIP container");

    // The temporary build file must have been renamed away.
    let leftovers: Vec<_> = fs::read_dir(out_dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path() != output)
        .collect();
    assert!(leftovers.is_empty(), "unexpected leftovers: {leftovers:?}");
}

/// An empty results directory produces a placeholder report by default and a
/// `no test result files` error under the strict policy.
///
/// 空结果目录默认生成占位报告，在严格策略下报 `no test result files` 错误。
#[test]
fn test_empty_directory_policies() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("empty.docx");

    execute(options(dir.path(), &output)).unwrap();
    assert!(output.exists());

    let mut strict = options(dir.path(), &out_dir.path().join("strict.docx"));
    strict.fail_if_empty = true;
    let err = execute(strict).unwrap_err();
    assert!(
        err.to_string().contains("no test result files"),
        "got: {err:#}"
    );
    assert!(!out_dir.path().join("strict.docx").exists());
}

/// A `--title` style override lands on the cover regardless of the config
/// file, and a custom config merged over standard still renders.
///
/// 标题覆盖会落到封面上而与配置文件无关；合并到 standard 之上的
/// 自定义配置同样可以渲染。
#[test]
fn test_generate_with_overrides_and_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    seed_session(dir.path());

    let config_path = out_dir.path().join("custom.toml");
    fs::write(
        &config_path,
        "[info]\ntrace = \"\"\n\n[details]\n\"Project\" = \"orion\"\n",
    )
    .unwrap();

    let output = out_dir.path().join("custom.docx");
    let mut opts = options(dir.path(), &output);
    opts.config = config_path.to_str().unwrap().to_string();
    opts.title = Some("Nightly Regression".to_string());
    execute(opts).unwrap();

    assert!(output.exists());
}
