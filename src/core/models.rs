//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the runner:
//! the discovered test case, the pipeline stages, and the outcome recorded
//! for every case.
//!
//! 此模块定义了整个运行器中使用的核心数据结构：
//! 发现的测试用例、流水线阶段，以及为每个用例记录的结果。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::config::CaseLayout;
use crate::infra::t;

/// The collaborator stages of the per-case pipeline.
/// 单用例流水线中的协作进程阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// The compiler turns the case input into a program.
    /// 编译器将用例输入转换为程序。
    Compile,
    /// The VM runs the generated program.
    /// 虚拟机运行生成的程序。
    Execute,
    /// The comparator checks the captured output against the golden output.
    /// 比较器将捕获的输出与黄金输出进行比较。
    Diff,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Compile => "compiler",
            Stage::Execute => "vm",
            Stage::Diff => "diff",
        };
        f.write_str(name)
    }
}

/// One discovered case directory and every path the pipeline touches for it.
/// Immutable for the duration of a run.
///
/// 一个已发现的用例目录，以及流水线为其访问的所有路径。
/// 在一次运行期间不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    /// Case identity: the directory name / 用例标识：目录名
    pub name: String,
    /// The case directory itself / 用例目录本身
    pub dir: PathBuf,
    /// Specification input for the compiler / 编译器的规格输入
    pub spec_input: PathBuf,
    /// Runtime input stream / 运行时输入流
    pub input: PathBuf,
    /// Golden output / 黄金输出
    pub expected: PathBuf,
    /// Generated program (derived) / 生成的程序（派生）
    pub program: PathBuf,
    /// Captured VM stdout (derived) / 捕获的虚拟机标准输出（派生）
    pub actual_output: PathBuf,
    /// Captured VM stderr (derived) / 捕获的虚拟机标准错误（派生）
    pub actual_diagnostics: PathBuf,
}

impl TestCase {
    /// Builds a case for the directory `dir` using the configured file names.
    pub fn new(name: impl Into<String>, dir: &Path, layout: &CaseLayout) -> Self {
        Self {
            name: name.into(),
            dir: dir.to_path_buf(),
            spec_input: dir.join(&layout.spec_input),
            input: dir.join(&layout.input),
            expected: dir.join(&layout.expected),
            program: dir.join(&layout.program),
            actual_output: dir.join(&layout.actual_output),
            actual_diagnostics: dir.join(&layout.actual_diagnostics),
        }
    }
}

/// The terminal classification of a case. Exactly one per processed case.
/// 用例的最终分类。每个已处理的用例恰好一个。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Compiled, and the VM output matched the golden output byte for byte.
    /// 编译成功，且虚拟机输出与黄金输出逐字节一致。
    Passed,
    /// The compiler could not be run, exited non-zero, or produced no program.
    /// 编译器无法运行、以非零状态退出或未生成程序。
    CompileFailed,
    /// Compiled, but the VM output differs from the golden output.
    /// 编译成功，但虚拟机输出与黄金输出不同。
    RuntimeMismatch,
}

impl Outcome {
    pub fn is_passed(self) -> bool {
        self == Outcome::Passed
    }

    /// Localized status label for display.
    /// 用于显示的本地化状态标签。
    pub fn label(self, locale: &str) -> String {
        match self {
            Outcome::Passed => t!("status.passed", locale = locale).to_string(),
            Outcome::CompileFailed => t!("status.compile_failed", locale = locale).to_string(),
            Outcome::RuntimeMismatch => t!("status.runtime_mismatch", locale = locale).to_string(),
        }
    }

    /// CSS class used by the HTML report.
    pub fn css_class(self) -> &'static str {
        match self {
            Outcome::Passed => "status-passed",
            Outcome::CompileFailed => "status-compile-failed",
            Outcome::RuntimeMismatch => "status-runtime-mismatch",
        }
    }
}

/// The recorded result of one case, in processing order.
/// 单个用例的记录结果，按处理顺序排列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    /// Case identity / 用例标识
    pub name: String,
    /// Final classification / 最终分类
    pub outcome: Outcome,
    /// Wall-clock time spent on the case / 用例耗费的时间
    #[serde(with = "duration_secs")]
    pub duration: Duration,
}

impl CaseRecord {
    pub fn new(name: impl Into<String>, outcome: Outcome, duration: Duration) -> Self {
        Self {
            name: name.into(),
            outcome,
            duration,
        }
    }
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }
}
