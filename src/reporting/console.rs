//! # Console Reporting Module / 控制台报告模块
//!
//! This module prints the live progress of a run and the final summary.
//! Every case gets a banner before it starts and one outcome line when it is
//! classified. The summary lists a remediation hint for every non-passing
//! case, compile failures first, each bucket in recording order.
//!
//! 此模块打印运行的实时进度和最终摘要。
//! 每个用例开始前打印一个横幅，分类后打印一行结果。
//! 摘要为每个未通过的用例列出修复提示，先列编译失败，每组按记录顺序排列。

use colored::*;
use std::path::{Path, PathBuf};

use crate::core::config::{CaseLayout, HarnessConfig};
use crate::core::models::{CaseRecord, Outcome, TestCase};
use crate::core::summary::RunSummary;
use crate::infra::command::Placeholders;
use crate::infra::t;

/// Builds the suggested re-run command for a failing case.
///
/// The template's placeholders are resolved against the case directory under
/// the tests root, so hints only need the case name.
///
/// 为失败用例构建建议的重新运行命令。
#[derive(Debug, Clone)]
pub struct RemediationHint {
    template: String,
    tests_dir: PathBuf,
    layout: CaseLayout,
}

impl RemediationHint {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            template: config.hint.clone(),
            tests_dir: config.tests_dir.clone(),
            layout: config.layout.clone(),
        }
    }

    /// The hint command for `name`, e.g. `nr compiler:watch tests/04_loop/test.in`.
    pub fn command_for(&self, name: &str) -> String {
        let case = TestCase::new(name, &self.tests_dir.join(name), &self.layout);
        Placeholders::for_case(&case).substitute(&self.template)
    }

    /// The full remediation line: header naming the case, then the command.
    pub fn line(&self, outcome: Outcome, name: &str, locale: &str) -> Option<String> {
        let header = match outcome {
            Outcome::Passed => return None,
            Outcome::CompileFailed => t!("summary.compile_errored", locale = locale, name = name),
            Outcome::RuntimeMismatch => t!("summary.runtime_wrong", locale = locale, name = name),
        };
        Some(format!("{}\n{}", header, self.command_for(name)))
    }
}

/// Prints the banner that opens a case.
pub fn print_case_banner(case: &TestCase, locale: &str) {
    println!(
        "{}",
        t!("run.case_banner", locale = locale, name = &case.name).blue()
    );
}

/// Prints the outcome line that closes a case.
pub fn print_case_outcome(record: &CaseRecord, locale: &str) {
    let line = match record.outcome {
        Outcome::Passed => t!("run.case_passed", locale = locale).green(),
        Outcome::CompileFailed => t!("run.case_compile_failed", locale = locale).red(),
        Outcome::RuntimeMismatch => {
            t!("run.case_mismatch", locale = locale, name = &record.name).red()
        }
    };
    println!("{}", line);
}

/// Renders the final summary: the pass count line and one remediation line
/// per non-passing case.
///
/// # Output Format / 输出格式
/// ```text
///
/// Passed 1 / 3 tests
/// Compiler errored [02_bad] ->
/// nr compiler:watch tests/02_bad/test.in
/// Runtime wrong [03_off] ->
/// nr compiler:watch tests/03_off/test.in
/// ```
pub fn render_summary(summary: &RunSummary, hint: &RemediationHint, locale: &str) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        t!(
            "summary.passed_total",
            locale = locale,
            passed = summary.passed,
            total = summary.total
        )
        .to_string(),
    ];

    let buckets = [
        (Outcome::CompileFailed, &summary.compile_failed),
        (Outcome::RuntimeMismatch, &summary.runtime_mismatch),
    ];
    for (outcome, names) in buckets {
        lines.extend(
            names
                .iter()
                .filter_map(|name| hint.line(outcome, name, locale)),
        );
    }

    lines
}

/// Prints the final summary to stdout.
pub fn print_summary(summary: &RunSummary, hint: &RemediationHint, locale: &str) {
    let color_pass_line = |line: &str| {
        if summary.all_passed() {
            line.green().bold()
        } else {
            line.yellow().bold()
        }
    };

    for (i, line) in render_summary(summary, hint, locale).iter().enumerate() {
        match i {
            0 => println!(),
            1 => println!("{}", color_pass_line(line.as_str())),
            _ => println!("{}", line.red()),
        }
    }
}

/// Prints the resolved tests root and the number of cases found in it.
pub fn print_discovery(root: &Path, count: usize, locale: &str) {
    println!(
        "{}",
        t!("run.discovered", locale = locale, count = count, path = root.display()).cyan()
    );
}
