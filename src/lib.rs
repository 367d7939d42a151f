//! # Golden Runner Library / Golden Runner 库
//!
//! This library provides the core functionality for Golden Runner, an
//! acceptance-test orchestrator for a compiler + virtual machine toolchain.
//! Every case directory is compiled, executed and compared byte-for-byte
//! against its golden output.
//!
//! 此库为 Golden Runner 提供核心功能，这是一个面向"编译器 + 虚拟机"工具链的验收测试编排器。
//! 每个用例目录都会被编译、执行，并与其黄金输出逐字节比较。
//!
//! ## Modules / 模块
//!
//! - `core` - Case discovery, the per-case pipeline and the run summary
//! - `infra` - Collaborator process plumbing and file system helpers
//! - `reporting` - Console, HTML and JSON reporting
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 用例发现、单用例流水线和运行摘要
//! - `infra` - 协作进程管理和文件系统辅助功能
//! - `reporting` - 控制台、HTML 和 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::discovery;
pub use crate::core::execution;
pub use crate::core::models;
pub use crate::core::summary;

/// Maps a requested locale onto one of the bundled translations.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en" from "en-US"), and finally falls back to "en".
///
/// 将请求的语言环境映射到内置的翻译之一。
pub fn resolve_locale(requested: &str) -> &str {
    let available_locales = rust_i18n::available_locales!();

    if available_locales.iter().any(|l| *l == requested) {
        return requested;
    }
    requested
        .split(['-', '_'])
        .next()
        .filter(|lang_code| available_locales.iter().any(|l| l == lang_code))
        .unwrap_or("en")
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
