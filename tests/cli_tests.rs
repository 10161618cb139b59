mod common;

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

use common::{sample_result, write_result};

/// This test runs `allure-docx` over a seeded results directory and asserts
/// that it exits successfully, prints the colored summary with the expected
/// shares, and writes the document.
///
/// 这个测试对一个种子结果目录运行 `allure-docx`，断言它成功退出、
/// 打印带有预期份额的摘要，并写出文档。
#[test]
fn test_successful_generation() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    write_result(
        dir.path(),
        "aaa",
        &sample_result("u-1", "h-1", "one", "passed", 1_000, 3_000),
    );
    write_result(
        dir.path(),
        "bbb",
        &sample_result("u-2", "h-2", "two", "failed", 3_000, 5_000),
    );
    let output = out_dir.path().join("report.docx");

    let mut cmd = Command::cargo_bin("allure-docx").unwrap();
    cmd.arg(dir.path()).arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--- Report Summary ---"))
        .stdout(predicate::str::contains("50.00%"))
        .stdout(predicate::str::contains("Report written to"));

    assert!(output.exists());
}

/// An empty directory succeeds by default (placeholder report) but fails
/// under `--fail-if-empty` with a message naming the directory.
///
/// 空目录默认成功（占位报告），但在 `--fail-if-empty` 下失败，
/// 错误信息指明该目录。
#[test]
fn test_fail_if_empty_flag() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let mut lenient = Command::cargo_bin("allure-docx").unwrap();
    lenient
        .arg(dir.path())
        .arg(out_dir.path().join("lenient.docx"));
    lenient.assert().success();

    let mut strict = Command::cargo_bin("allure-docx").unwrap();
    strict
        .arg(dir.path())
        .arg(out_dir.path().join("strict.docx"))
        .arg("--fail-if-empty");
    strict
        .assert()
        .failure()
        .stderr(predicate::str::contains("no test result files"));
}

/// A corrupt result file fails the run and names the offending file.
///
/// 损坏的结果文件会使运行失败，并指明出错的文件。
#[test]
fn test_malformed_input_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad-result.json"), "{oops").unwrap();

    let mut cmd = Command::cargo_bin("allure-docx").unwrap();
    cmd.arg(dir.path()).arg(out_dir.path().join("report.docx"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("malformed input file"))
        .stderr(predicate::str::contains("bad-result.json"));
}

/// A results path that is not a directory fails before anything is written.
///
/// 不是目录的结果路径会在写出任何内容之前失败。
#[test]
fn test_missing_results_directory_fails() {
    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("report.docx");

    let mut cmd = Command::cargo_bin("allure-docx").unwrap();
    cmd.arg("/no/such/allure-results").arg(&output);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));

    assert!(!output.exists());
}

/// The help text describes the logo as a cover-page element, which is where
/// the renderer actually places it.
///
/// 帮助文本将 logo 描述为封面元素，这正是渲染器实际放置它的位置。
#[test]
fn test_help_describes_logo_placement() {
    let mut cmd = Command::cargo_bin("allure-docx").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("placed on the cover page"));
}

/// An unknown preset name is treated as a config file path and reported as
/// unreadable.
///
/// 未知的预设名被当作配置文件路径处理，并报告为不可读。
#[test]
fn test_unknown_config_selector_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    write_result(
        dir.path(),
        "aaa",
        &sample_result("u-1", "h-1", "one", "passed", 1_000, 3_000),
    );

    let mut cmd = Command::cargo_bin("allure-docx").unwrap();
    cmd.arg(dir.path())
        .arg(out_dir.path().join("report.docx"))
        .arg("--config")
        .arg("no_such_preset");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}
