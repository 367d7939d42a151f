//! # Configuration Module / 配置模块
//!
//! Defines the `GoldenRunner.toml` configuration: where the cases live, how the
//! collaborators (compiler, VM, comparator) are invoked, and the file names
//! that make up a case directory. Every key is optional.
//!
//! 定义 `GoldenRunner.toml` 配置：用例所在位置、协作进程（编译器、虚拟机、比较器）
//! 的调用方式，以及构成用例目录的文件名。所有键都是可选的。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::infra::t;

/// Default file name looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "GoldenRunner.toml";

/// Comparator value selecting the in-process exact byte comparison.
/// 选择进程内逐字节精确比较的比较器取值。
pub const BUILTIN_COMPARATOR: &str = "builtin";

/// File names that make up one case directory.
/// 构成单个用例目录的文件名。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseLayout {
    /// Specification input for the compiler / 编译器的规格输入
    pub spec_input: String,
    /// Runtime input stream fed to the compiler / 提供给编译器的运行时输入流
    pub input: String,
    /// Golden output / 黄金输出
    pub expected: String,
    /// Program generated by the compiler / 编译器生成的程序
    pub program: String,
    /// Captured VM stdout / 捕获的虚拟机标准输出
    pub actual_output: String,
    /// Captured VM stderr / 捕获的虚拟机标准错误
    pub actual_diagnostics: String,
}

impl Default for CaseLayout {
    fn default() -> Self {
        Self {
            spec_input: "spec-input".to_string(),
            input: "test.in".to_string(),
            expected: "test.out".to_string(),
            program: "a.frisc".to_string(),
            actual_output: "my.out".to_string(),
            actual_diagnostics: "my.err".to_string(),
        }
    }
}

/// The complete runner configuration, loaded from a TOML file.
///
/// Command lines are split POSIX-style and may contain the placeholders
/// `{case}`, `{dir}`, `{spec}`, `{input}`, `{expected}`, `{program}`,
/// `{actual}` and `{diagnostics}`, substituted per case.
///
/// 从 TOML 文件加载的完整运行器配置。
/// 命令行按 POSIX 规则拆分，可以包含按用例替换的占位符。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Falls back to the system locale when unset.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。未设置时使用系统语言。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Root directory holding one subdirectory per case.
    /// 每个用例占一个子目录的根目录。
    pub tests_dir: PathBuf,

    /// Compiler collaborator. Reads the case input on stdin and must write
    /// the generated program.
    /// 编译器协作进程。从标准输入读取用例输入，并且必须写出生成的程序。
    pub compiler: String,

    /// VM collaborator. Reads the generated program on stdin.
    /// 虚拟机协作进程。从标准输入读取生成的程序。
    pub vm: String,

    /// Comparator collaborator, or `"builtin"` for exact in-process comparison.
    /// Exit status 0 means identical.
    /// 比较器协作进程，或 `"builtin"` 表示进程内精确比较。退出码 0 表示相同。
    pub diff: String,

    /// Remediation command suggested for every non-passing case.
    /// 为每个未通过的用例建议的修复命令。
    pub hint: String,

    /// Optional wall-clock bound for every collaborator invocation. Unset means wait forever.
    /// 每次协作进程调用的可选时间上限。未设置表示无限等待。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Sort discovered cases by name instead of keeping the file system order.
    /// 按名称对发现的用例排序，而不是保留文件系统顺序。
    pub sort_cases: bool,

    /// File names inside each case directory / 每个用例目录中的文件名
    pub layout: CaseLayout,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            language: None,
            tests_dir: PathBuf::from("tests"),
            compiler: "python3 ./FRISCGenerator.py {program}".to_string(),
            vm: "node vm/main.js".to_string(),
            diff: "diff {actual} {expected}".to_string(),
            hint: "nr compiler:watch {input}".to_string(),
            timeout_secs: None,
            sort_cases: false,
            layout: CaseLayout::default(),
        }
    }
}

impl HarnessConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| t!("config.parse_failed").to_string())
    }

    /// Loads the configuration file at `path`.
    ///
    /// When `required` is false a missing file yields the defaults; an
    /// explicitly requested file must exist.
    ///
    /// 加载 `path` 处的配置文件。
    /// 当 `required` 为 false 时，缺失的文件会返回默认配置；显式指定的文件必须存在。
    pub fn load(path: &Path, required: bool) -> Result<(Self, Option<PathBuf>)> {
        if !required && !path.exists() {
            return Ok((Self::default(), None));
        }

        let config_path = fs::canonicalize(path)
            .with_context(|| t!("config.read_failed", path = path.display()).to_string())?;
        let content = fs::read_to_string(&config_path)
            .with_context(|| t!("config.read_failed", path = config_path.display()).to_string())?;

        Ok((Self::from_toml_str(&content)?, Some(config_path)))
    }

    /// Renders the configuration back to TOML, used by `init`.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Returns true when the comparator is the in-process byte comparison.
    pub fn uses_builtin_diff(&self) -> bool {
        self.diff.trim() == BUILTIN_COMPARATOR
    }
}
