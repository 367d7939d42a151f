//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: load the configuration,
//! discover the cases, push each one through the pipeline in discovery
//! order, and report.
//!
//! Individual case outcomes never make the command fail. Only fatal
//! problems do: an unreadable configuration, a missing tests root, or a
//! VM/comparator that cannot be started.
//!
//! 此模块实现 `run` 命令：加载配置、发现用例、按发现顺序让每个用例通过流水线，然后报告。
//! 单个用例的结果不会导致命令失败。只有致命问题才会：无法读取的配置、缺失的测试根目录，
//! 或无法启动的虚拟机/比较器。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{
        config::HarnessConfig,
        discovery::{discover_cases, select_cases, sort_cases},
        execution::Pipeline,
        summary::RunSummary,
    },
    infra::{fs, t},
    reporting::{
        console::{self, RemediationHint, print_case_banner, print_case_outcome, print_summary},
        html::generate_html_report,
        json::write_json_summary,
    },
};

/// Options of the `run` command after CLI parsing.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Configuration file / 配置文件
    pub config: PathBuf,
    /// True when the file was named explicitly and therefore must exist.
    /// 当文件被显式指定时为 true，此时文件必须存在。
    pub config_required: bool,
    /// Overrides `tests_dir` / 覆盖 `tests_dir`
    pub tests_dir: Option<PathBuf>,
    /// Restrict the run to these case names / 仅运行这些用例
    pub cases: Vec<String>,
    /// Overrides `timeout_secs` / 覆盖 `timeout_secs`
    pub timeout_secs: Option<u64>,
    /// Optional HTML report path / 可选的 HTML 报告路径
    pub html: Option<PathBuf>,
    /// Optional JSON summary path / 可选的 JSON 摘要路径
    pub json: Option<PathBuf>,
    pub verbose: bool,
    /// Language given with `--lang`, which wins over the config file.
    pub lang: Option<String>,
}

/// Executes the run command with the provided options.
///
/// # Arguments
/// * `options` - Parsed command-line options
/// * `detected_locale` - Locale used when neither `--lang` nor the config sets one
///
/// # Returns
/// The finished `RunSummary`, whatever the individual outcomes were.
pub async fn execute(options: RunOptions, detected_locale: &str) -> Result<RunSummary> {
    let (mut config, config_path) = HarnessConfig::load(&options.config, options.config_required)?;

    let locale = crate::resolve_locale(
        options
            .lang
            .as_deref()
            .or(config.language.as_deref())
            .unwrap_or(detected_locale),
    )
    .to_string();
    rust_i18n::set_locale(&locale);

    match &config_path {
        Some(path) => println!(
            "{}",
            t!("run.config_loaded", locale = &locale, path = path.display())
        ),
        None => println!("{}", t!("run.config_defaults", locale = &locale).dimmed()),
    }

    if let Some(tests_dir) = options.tests_dir {
        config.tests_dir = tests_dir;
    }
    if options.timeout_secs.is_some() {
        config.timeout_secs = options.timeout_secs;
    }

    let pipeline = Pipeline::new(&config)
        .context(t!("run.invalid_collaborator", locale = &locale).to_string())?
        .verbose(options.verbose);

    let mut cases = discover_cases(&config.tests_dir, &config.layout).with_context(|| {
        t!("run.discovery_failed", locale = &locale, path = config.tests_dir.display()).to_string()
    })?;
    if config.sort_cases {
        sort_cases(&mut cases);
    }

    let (cases, unknown) = select_cases(cases, &options.cases);
    for name in &unknown {
        println!(
            "{}",
            t!("run.unknown_case", locale = &locale, name = name).yellow()
        );
    }

    console::print_discovery(&fs::display_path(&config.tests_dir), cases.len(), &locale);

    let mut summary = RunSummary::new(cases.len());
    for case in &cases {
        print_case_banner(case, &locale);
        let record = pipeline
            .run_case(case)
            .await
            .with_context(|| t!("run.case_aborted", locale = &locale, name = &case.name).to_string())?;
        print_case_outcome(&record, &locale);
        summary.record(record);
    }
    debug_assert!(summary.is_complete());

    let hint = RemediationHint::new(&config);
    print_summary(&summary, &hint, &locale);

    if let Some(report_path) = &options.html {
        println!(
            "\n{}",
            t!("run.html_report", locale = &locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&summary, &hint, report_path, &locale) {
            eprintln!("{} {:#}", t!("run.report_failed", locale = &locale).red(), e);
        }
    }

    if let Some(json_path) = &options.json {
        if let Err(e) = write_json_summary(&summary, json_path) {
            eprintln!("{} {:#}", t!("run.report_failed", locale = &locale).red(), e);
        }
    }

    Ok(summary)
}
