//! # CLI Tests / 命令行测试
//!
//! Runs the `golden-runner` binary against temporary case directories and
//! checks the console summary and the exit status.
//!
//! 针对临时用例目录运行 `golden-runner` 二进制文件，检查控制台摘要和退出状态。

#![cfg(unix)]

mod common;

use assert_cmd::prelude::*;
use common::Workspace;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn runner(ws: &Workspace) -> Command {
    let mut cmd = Command::cargo_bin("golden-runner").unwrap();
    cmd.current_dir(ws.path())
        .env("NO_COLOR", "1")
        .arg("--lang")
        .arg("en");
    cmd
}

/// A case whose output matches passes, and the summary shows passed == total.
/// 输出一致的用例通过，摘要显示通过数等于总数。
#[test]
fn matching_case_passes() {
    let ws = Workspace::new();
    ws.add_passing_case("01_ok");
    ws.write_config(&ws.config());

    runner(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("----- Testing 01_ok -----"))
        .stdout(predicate::str::contains("Passed 1 / 1 tests"))
        .stdout(predicate::str::contains("->").not());
}

/// A rejected input is a compile failure with a remediation line, and the
/// run still exits successfully.
/// 被拒绝的输入属于编译失败并带有修复提示，运行仍然成功退出。
#[test]
fn compile_failure_is_reported_with_hint() {
    let ws = Workspace::new();
    ws.add_malformed_case("02_bad");
    ws.write_config(&ws.config());

    runner(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to generate frisc code"))
        .stdout(predicate::str::contains("Passed 0 / 1 tests"))
        .stdout(predicate::str::contains("Compiler errored [02_bad] ->"))
        .stdout(predicate::str::contains("nr compiler:watch"))
        .stdout(predicate::str::contains("02_bad/test.in"));
}

/// A single trailing newline is enough for a runtime mismatch.
/// 仅一个末尾换行符的差异就足以导致运行结果不一致。
#[test]
fn trailing_newline_is_a_mismatch() {
    let ws = Workspace::new();
    ws.add_trailing_newline_case("03_nl");
    ws.write_config(&ws.config());

    runner(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test 03_nl failed"))
        .stdout(predicate::str::contains("Runtime wrong [03_nl] ->"))
        .stdout(predicate::str::contains("Compiler errored").not());
}

/// An empty root reports 0 / 0 and no remediation lines.
/// 空的根目录报告 0 / 0，且没有修复提示。
#[test]
fn empty_root_reports_zero_of_zero() {
    let ws = Workspace::new();
    ws.write_config(&ws.config());

    runner(&ws)
        .assert()
        .success()
        .stdout(predicate::str::contains("Passed 0 / 0 tests"))
        .stdout(predicate::str::contains("->").not());
}

#[test]
fn remediation_lines_are_grouped_by_bucket() {
    let ws = Workspace::new();
    ws.add_trailing_newline_case("a_nl");
    ws.add_malformed_case("b_bad");
    ws.add_passing_case("c_ok");
    let config = golden_runner::config::HarnessConfig {
        sort_cases: true,
        ..ws.config()
    };
    ws.write_config(&config);

    let output = runner(&ws).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let compile = stdout.find("Compiler errored [b_bad]").unwrap();
    let runtime = stdout.find("Runtime wrong [a_nl]").unwrap();
    assert!(compile < runtime);
    assert!(stdout.contains("Passed 1 / 3 tests"));
    assert!(!stdout.contains("[c_ok]"));
}

#[test]
fn case_filter_limits_the_run() {
    let ws = Workspace::new();
    ws.add_passing_case("01_ok");
    ws.add_malformed_case("02_bad");
    ws.write_config(&ws.config());

    runner(&ws)
        .arg("run")
        .arg("--case")
        .arg("01_ok")
        .arg("--case")
        .arg("nope")
        .assert()
        .success()
        .stdout(predicate::str::contains("No test case named 'nope'"))
        .stdout(predicate::str::contains("Passed 1 / 1 tests"))
        .stdout(predicate::str::contains("02_bad").not());
}

#[test]
fn tests_dir_flag_overrides_the_config() {
    let ws = Workspace::new();
    let other = ws.path().join("other");
    fs::create_dir_all(other.join("only")).unwrap();
    fs::write(other.join("only").join("test.in"), "X\n").unwrap();
    fs::write(other.join("only").join("test.out"), "X\n").unwrap();
    ws.add_passing_case("01_ok");
    ws.write_config(&ws.config());

    runner(&ws)
        .arg("--tests-dir")
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::contains("----- Testing only -----"))
        .stdout(predicate::str::contains("Passed 1 / 1 tests"));
}

#[test]
fn json_and_html_reports_are_written() {
    let ws = Workspace::new();
    ws.add_passing_case("01_ok");
    ws.add_malformed_case("02_bad");
    ws.write_config(&ws.config());
    let json_path = ws.path().join("summary.json");
    let html_path = ws.path().join("report.html");

    runner(&ws)
        .arg("--json")
        .arg(&json_path)
        .arg("--html")
        .arg(&html_path)
        .assert()
        .success();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(summary["total"], 2);
    assert_eq!(summary["passed"], 1);
    assert_eq!(summary["compile_failed"][0], "02_bad");

    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("02_bad"));
    assert!(html.contains("status-compile-failed"));
}

#[test]
fn chinese_locale_translates_the_summary() {
    let ws = Workspace::new();
    ws.add_passing_case("01_ok");
    ws.write_config(&ws.config());

    let mut cmd = Command::cargo_bin("golden-runner").unwrap();
    cmd.current_dir(ws.path())
        .env("NO_COLOR", "1")
        .arg("--lang")
        .arg("zh-CN")
        .assert()
        .success()
        .stdout(predicate::str::contains("通过 1 / 1 个测试"));
}

#[test]
fn init_writes_a_config_the_runner_accepts() {
    let ws = Workspace::new();

    runner(&ws)
        .arg("init")
        .arg("--non-interactive")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to"));

    let content = fs::read_to_string(ws.path().join("GoldenRunner.toml")).unwrap();
    assert!(content.contains("FRISCGenerator.py"));
    assert!(content.contains("[layout]"));
}

#[test]
fn lang_flag_after_the_subcommand_is_honoured() {
    let ws = Workspace::new();
    ws.add_passing_case("01_ok");
    ws.write_config(&ws.config());

    let mut cmd = Command::cargo_bin("golden-runner").unwrap();
    cmd.current_dir(ws.path())
        .env("NO_COLOR", "1")
        .args(["run", "--lang", "zh-CN", "--case", "01_ok"])
        .assert()
        .success()
        .stdout(predicate::str::contains("通过 1 / 1 个测试"));
}
