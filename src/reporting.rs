//! # Reporting Module / 报告模块
//!
//! This module handles the display of live progress and the final summary in the
//! console, plus the optional HTML and JSON reports written after a run.
//!
//! 此模块处理控制台中的实时进度和最终摘要的显示，
//! 以及运行结束后可选写出的 HTML 和 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{RemediationHint, print_case_banner, print_case_outcome, print_summary};
pub use html::generate_html_report;
pub use json::write_json_summary;
