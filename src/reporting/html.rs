//! # HTML Reporting Module / HTML 报告模块
//!
//! This module writes a self-contained HTML page for a finished run:
//! summary counters, one table row per case in processing order, and the
//! remediation command for every non-passing case.
//!
//! 此模块为已完成的运行写出一个独立的 HTML 页面：
//! 汇总计数、按处理顺序每个用例一行的表格，以及每个未通过用例的修复命令。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::Outcome;
use crate::core::summary::RunSummary;
use crate::infra::t;
use crate::reporting::console::RemediationHint;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = "\
body{font-family:sans-serif;margin:2em;color:#222}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ddd;padding:6px 10px;text-align:left}\
th{background:#f4f4f4}\
.summary-container{display:flex;gap:2em;margin-bottom:1.5em}\
.summary-item{display:flex;flex-direction:column}\
.count{font-size:1.8em;font-weight:bold}\
.status-passed{color:#1a7f37}\
.status-compile-failed{color:#cf222e}\
.status-runtime-mismatch{color:#bf8700}\
.duration-cell{text-align:right}\
code{background:#f6f8fa;padding:2px 4px}";

/// Builds the HTML page for `summary`.
///
/// # Arguments / 参数
/// * `summary` - The finished run / 已完成的运行
/// * `hint` - Remediation command builder / 修复命令构建器
/// * `locale` - The locale to use for internationalization / 用于国际化的语言环境
pub fn render_html_report(summary: &RunSummary, hint: &RemediationHint, locale: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        escape_html(&t!("html_report.title", locale = locale))
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style></head><body>");
    html.push_str(&format!(
        "<h1>{}</h1>",
        escape_html(&t!("html_report.main_header", locale = locale))
    ));

    let counters = [
        (summary.total, "", t!("html_report.summary.total", locale = locale)),
        (summary.passed, Outcome::Passed.css_class(), Outcome::Passed.label(locale).into()),
        (
            summary.compile_failed.len(),
            Outcome::CompileFailed.css_class(),
            Outcome::CompileFailed.label(locale).into(),
        ),
        (
            summary.runtime_mismatch.len(),
            Outcome::RuntimeMismatch.css_class(),
            Outcome::RuntimeMismatch.label(locale).into(),
        ),
    ];
    html.push_str("<div class='summary-container'>");
    for (count, class, label) in counters {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count {}'>{}</span><span class='label'>{}</span></div>",
            class,
            count,
            escape_html(&label)
        ));
    }
    html.push_str("</div>");

    html.push_str("<table><thead><tr>");
    let headers = [
        t!("html_report.table.name", locale = locale),
        t!("html_report.table.status", locale = locale),
        t!("html_report.table.duration", locale = locale),
        t!("html_report.table.hint", locale = locale),
    ];
    for header in headers {
        html.push_str(&format!("<th>{}</th>", escape_html(&header)));
    }
    html.push_str("</tr></thead><tbody>");

    for record in &summary.records {
        let hint_cell = if record.outcome.is_passed() {
            String::new()
        } else {
            format!("<code>{}</code>", escape_html(&hint.command_for(&record.name)))
        };
        html.push_str(&format!(
            "<tr><td>{}</td><td class='{}'>{}</td><td class='duration-cell'>{:.2}s</td><td>{}</td></tr>",
            escape_html(&record.name),
            record.outcome.css_class(),
            escape_html(&record.outcome.label(locale)),
            record.duration.as_secs_f64(),
            hint_cell
        ));
    }

    html.push_str("</tbody></table></body></html>");
    html
}

/// Writes the HTML report for `summary` to `output_path`.
///
/// # Errors / 错误
/// This function will return an error if the output file cannot be written.
/// 如果无法写入输出文件，此函数将返回错误。
pub fn generate_html_report(
    summary: &RunSummary,
    hint: &RemediationHint,
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let html = render_html_report(summary, hint, locale);
    fs::write(output_path, html)
        .with_context(|| format!("Failed to write HTML report to {}", output_path.display()))
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::HarnessConfig;
    use crate::core::models::CaseRecord;
    use std::time::Duration;

    #[test]
    fn report_has_one_row_per_case_and_hints_for_failures() {
        let summary = RunSummary::from_records(
            2,
            vec![
                CaseRecord::new("ok", Outcome::Passed, Duration::from_millis(20)),
                CaseRecord::new("<bad>", Outcome::CompileFailed, Duration::from_millis(5)),
            ],
        );
        let hint = RemediationHint::new(&HarnessConfig::default());

        let html = render_html_report(&summary, &hint, "en");

        assert_eq!(html.matches("<tr><td>").count(), 2);
        assert!(html.contains("&lt;bad&gt;"));
        assert!(html.contains("nr compiler:watch"));
        assert!(html.contains("status-compile-failed"));
    }

    #[test]
    fn escape_html_handles_quotes() {
        assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
    }
}
