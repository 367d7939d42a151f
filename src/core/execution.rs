//! # Case Execution Module / 用例执行模块
//!
//! This module runs one case through the pipeline:
//! Compile Step → Execute Step → Diff & Classify.
//!
//! Compile failures of any kind are recovered here and classified as
//! `CompileFailed`; the VM and comparator are never started for such a case.
//! The VM exit status is ignored, only the comparison decides between
//! `Passed` and `RuntimeMismatch`. Failing to start the VM or the comparator
//! is an error that ends the run.
//!
//! 此模块让单个用例依次经过流水线：编译 → 执行 → 比较与分类。
//! 任何编译失败都在此处恢复并归类为 `CompileFailed`；此类用例不会启动虚拟机和比较器。
//! 虚拟机的退出状态被忽略，只有比较结果决定 `Passed` 或 `RuntimeMismatch`。
//! 无法启动虚拟机或比较器是会终止运行的错误。

use colored::*;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use crate::{
    core::{
        config::HarnessConfig,
        error::HarnessError,
        models::{CaseRecord, Outcome, Stage, TestCase},
    },
    infra::{
        command::{self, CommandTemplate, Completion, Placeholders},
        fs, t,
    },
};

/// How the captured output is compared with the golden output.
/// 捕获输出与黄金输出的比较方式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparator {
    /// Exact in-process byte comparison / 进程内逐字节精确比较
    Builtin,
    /// External tool; exit status 0 means identical / 外部工具；退出码 0 表示相同
    External(CommandTemplate),
}

/// Why the Compile Step did not produce a usable program.
/// Only reported to the user, never stored in the outcome.
///
/// 编译步骤未能生成可用程序的原因。仅向用户报告，不会存入结果。
#[derive(Debug)]
pub enum CompileFailure {
    /// The previous run's program could not be removed.
    StaleProgram { path: PathBuf, error: io::Error },
    /// The case input could not be opened for the compiler's stdin.
    MissingInput { path: PathBuf, error: io::Error },
    /// The compiler process could not be started.
    Spawn { program: String, error: io::Error },
    /// The compiler exited with a non-zero status.
    Exited(ExitStatus),
    /// The compiler exceeded the configured time bound.
    TimedOut(Duration),
    /// The compiler exited successfully without writing the program.
    NoProgram(PathBuf),
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::StaleProgram { path, error } => {
                t!("compile.stale_program", path = path.display(), error = error)
            }
            Self::MissingInput { path, error } => {
                t!("compile.missing_input", path = path.display(), error = error)
            }
            Self::Spawn { program, error } => {
                t!("compile.spawn_failed", program = program, error = error)
            }
            Self::Exited(status) => t!("compile.exited", status = status),
            Self::TimedOut(limit) => t!("compile.timed_out", timeout = limit.as_secs()),
            Self::NoProgram(path) => t!("compile.no_program", path = path.display()),
        };
        f.write_str(&message)
    }
}

/// Result of the Compile Step.
#[derive(Debug)]
pub enum CompileStatus {
    /// The program was generated; proceed to the Execute Step.
    Compiled,
    /// The case is `CompileFailed`. `output` holds the compiler's captured output.
    Failed {
        reason: CompileFailure,
        output: String,
    },
}

/// The per-case pipeline, built once per run from the configuration.
/// 单用例流水线，每次运行根据配置构建一次。
#[derive(Debug, Clone)]
pub struct Pipeline {
    compiler: CommandTemplate,
    vm: CommandTemplate,
    comparator: Comparator,
    timeout: Option<Duration>,
    verbose: bool,
}

impl Pipeline {
    /// Parses the collaborator command lines of `config`.
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let comparator = if config.uses_builtin_diff() {
            Comparator::Builtin
        } else {
            Comparator::External(CommandTemplate::parse(Stage::Diff, &config.diff)?)
        };

        Ok(Self {
            compiler: CommandTemplate::parse(Stage::Compile, &config.compiler)?,
            vm: CommandTemplate::parse(Stage::Execute, &config.vm)?,
            comparator,
            timeout: config.timeout_secs.map(Duration::from_secs),
            verbose: false,
        })
    }

    /// Overrides the per-collaborator time bound.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Prints resolved command lines and failure details while running.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn comparator(&self) -> &Comparator {
        &self.comparator
    }

    /// Runs one case and returns its single outcome.
    ///
    /// # Errors
    /// Only when the VM or the comparator cannot be started; compile problems
    /// are outcomes, not errors.
    pub async fn run_case(&self, case: &TestCase) -> Result<CaseRecord, HarnessError> {
        let start = Instant::now();

        let outcome = match self.compile(case).await {
            CompileStatus::Compiled => {
                self.execute(case).await?;
                self.compare(case).await?
            }
            CompileStatus::Failed { reason, output } => {
                if let CompileFailure::TimedOut(_) = reason {
                    println!("{}", reason.to_string().red());
                } else if self.verbose {
                    println!("  {}", reason.to_string().yellow());
                }
                if self.verbose && !output.trim().is_empty() {
                    println!("{}", t!("compile.output_header").dimmed());
                    println!("{}", output.trim_end());
                }
                Outcome::CompileFailed
            }
        };

        if self.verbose && outcome == Outcome::RuntimeMismatch {
            println!(
                "  {}",
                t!(
                    "run.mismatch_artifacts",
                    actual = case.actual_output.display(),
                    expected = case.expected.display(),
                    diagnostics = case.actual_diagnostics.display()
                )
                .dimmed()
            );
        }

        Ok(CaseRecord::new(&case.name, outcome, start.elapsed()))
    }

    /// Compile Step: feeds the case input to the compiler and checks that the
    /// program was written. Never fails the run.
    ///
    /// 编译步骤：将用例输入提供给编译器，并检查程序是否已写出。不会终止运行。
    pub async fn compile(&self, case: &TestCase) -> CompileStatus {
        let failed = |reason| CompileStatus::Failed {
            reason,
            output: String::new(),
        };

        // A leftover program must not pass for this run's output.
        if let Err(error) = fs::remove_stale(&case.program) {
            return failed(CompileFailure::StaleProgram {
                path: case.program.clone(),
                error,
            });
        }

        let input = match std::fs::File::open(&case.input) {
            Ok(file) => file,
            Err(error) => {
                return failed(CompileFailure::MissingInput {
                    path: case.input.clone(),
                    error,
                });
            }
        };

        let vars = Placeholders::for_case(case);
        self.log_command(&self.compiler, &vars);
        let mut cmd = self.compiler.to_command(&vars);
        cmd.stdin(Stdio::from(input));

        let (completion, output) = command::spawn_and_capture(cmd, self.timeout).await;
        let reason = match completion {
            Err(error) => CompileFailure::Spawn {
                program: self.compiler.program().to_string(),
                error,
            },
            Ok(Completion::TimedOut) => {
                CompileFailure::TimedOut(self.timeout.unwrap_or_default())
            }
            Ok(Completion::Exited(status)) if !status.success() => CompileFailure::Exited(status),
            Ok(Completion::Exited(_)) if !fs::is_file(&case.program) => {
                CompileFailure::NoProgram(case.program.clone())
            }
            Ok(Completion::Exited(_)) => return CompileStatus::Compiled,
        };

        CompileStatus::Failed { reason, output }
    }

    /// Execute Step: runs the generated program on the VM, capturing stdout
    /// and stderr into the case's artifacts. The exit status is not interpreted.
    ///
    /// 执行步骤：在虚拟机上运行生成的程序，将 stdout 和 stderr 捕获到用例产物中。
    /// 不解释退出状态。
    pub async fn execute(&self, case: &TestCase) -> Result<Completion, HarnessError> {
        let program = fs::open_artifact(&case.program)?;
        let stdout = fs::create_artifact(&case.actual_output)?;
        let stderr = fs::create_artifact(&case.actual_diagnostics)?;

        let vars = Placeholders::for_case(case);
        self.log_command(&self.vm, &vars);
        let mut cmd = self.vm.to_command(&vars);
        cmd.stdin(Stdio::from(program))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));

        let spawn_error = |source| HarnessError::Spawn {
            stage: Stage::Execute,
            program: self.vm.program().to_string(),
            source,
        };
        let mut child = cmd.spawn().map_err(spawn_error)?;
        let completion = command::wait_bounded(&mut child, self.timeout)
            .await
            .map_err(spawn_error)?;

        if completion == Completion::TimedOut {
            println!(
                "{}",
                t!(
                    "run.vm_timed_out",
                    name = &case.name,
                    timeout = self.timeout.unwrap_or_default().as_secs()
                )
                .yellow()
            );
        }

        Ok(completion)
    }

    /// Diff & Classify: exact comparison of the captured output with the
    /// golden output. Any difference, including a trailing newline, is a mismatch.
    ///
    /// 比较与分类：将捕获的输出与黄金输出精确比较。任何差异（包括末尾换行符）都视为不一致。
    pub async fn compare(&self, case: &TestCase) -> Result<Outcome, HarnessError> {
        let identical = match &self.comparator {
            Comparator::Builtin => fs::contents_match(&case.actual_output, &case.expected).await,
            Comparator::External(diff) => {
                let vars = Placeholders::for_case(case);
                self.log_command(diff, &vars);
                let mut cmd = diff.to_command(&vars);
                cmd.stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());

                let spawn_error = |source| HarnessError::Spawn {
                    stage: Stage::Diff,
                    program: diff.program().to_string(),
                    source,
                };
                let mut child = cmd.spawn().map_err(spawn_error)?;
                command::wait_bounded(&mut child, self.timeout)
                    .await
                    .map_err(spawn_error)?
                    .success()
            }
        };

        Ok(if identical {
            Outcome::Passed
        } else {
            Outcome::RuntimeMismatch
        })
    }

    fn log_command(&self, template: &CommandTemplate, vars: &Placeholders) {
        if self.verbose {
            println!(
                "  {} {}",
                t!("run.command_prefix").blue(),
                template.render(vars)
            );
        }
    }
}
