//! # Command Execution Module / 命令执行模块
//!
//! Collaborator command lines and process plumbing: splitting configured
//! command lines into templates, substituting per-case placeholders, spawning
//! with captured output, and waiting with an optional time bound.
//!
//! 协作进程命令行和进程管理：将配置的命令行拆分为模板、替换每个用例的占位符、
//! 派生进程并捕获输出，以及带可选时间上限的等待。

use std::io;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::Mutex;
use tokio::process::{Child, Command};

use crate::core::error::HarnessError;
use crate::core::models::{Stage, TestCase};
use crate::infra::t;

/// Placeholder values substituted into command-line arguments.
/// 替换到命令行参数中的占位符值。
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pairs: Vec<(&'static str, String)>,
}

impl Placeholders {
    /// All placeholders available for one case.
    pub fn for_case(case: &TestCase) -> Self {
        let path = |p: &std::path::Path| p.to_string_lossy().into_owned();
        Self {
            pairs: vec![
                ("{case}", case.name.clone()),
                ("{dir}", path(&case.dir)),
                ("{spec}", path(&case.spec_input)),
                ("{input}", path(&case.input)),
                ("{expected}", path(&case.expected)),
                ("{program}", path(&case.program)),
                ("{actual}", path(&case.actual_output)),
                ("{diagnostics}", path(&case.actual_diagnostics)),
            ],
        }
    }

    /// Replaces every known placeholder in `text`. Unknown braces are left alone.
    pub fn substitute(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (key, value)| acc.replace(key, value))
    }
}

/// A collaborator command line split into program and argument templates.
///
/// The line is split with POSIX shell quoting rules, and `~`/`$VAR` are
/// expanded in the program token only, so arguments such as `sh -c '... $0'`
/// reach the collaborator untouched. Placeholders are substituted per argument
/// after splitting, which keeps paths containing spaces as single arguments.
///
/// 拆分为程序和参数模板的协作进程命令行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    pub fn parse(stage: Stage, command_line: &str) -> Result<Self, HarnessError> {
        let invalid = || HarnessError::InvalidCommand {
            stage,
            command: command_line.to_string(),
        };

        let parts = shlex::split(command_line).ok_or_else(invalid)?;
        let (program, args) = parts.split_first().ok_or_else(invalid)?;
        let program = shellexpand::full(program)
            .map_err(|_| invalid())?
            .into_owned();

        Ok(Self {
            program,
            args: args.to_vec(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn render_args(&self, vars: &Placeholders) -> Vec<String> {
        self.args.iter().map(|arg| vars.substitute(arg)).collect()
    }

    /// Shell-quoted rendering for display, e.g. in verbose logs.
    pub fn render(&self, vars: &Placeholders) -> String {
        std::iter::once(self.program.clone())
            .chain(self.render_args(vars))
            .map(|part| match shlex::try_quote(&part) {
                Ok(quoted) => quoted.into_owned(),
                Err(_) => part,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A ready-to-configure command. The child is killed if the handle is dropped.
    pub fn to_command(&self, vars: &Placeholders) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.render_args(vars)).kill_on_drop(true);
        cmd
    }
}

/// How a waited-for process ended.
/// 被等待的进程如何结束。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The process exited on its own / 进程自行退出
    Exited(ExitStatus),
    /// The time bound elapsed and the process was killed / 超过时间上限，进程已被终止
    TimedOut,
}

impl Completion {
    pub fn success(&self) -> bool {
        matches!(self, Completion::Exited(status) if status.success())
    }
}

/// Waits for `child`, killing it once `timeout` elapses. `None` waits forever.
///
/// 等待 `child`，超过 `timeout` 后将其终止。`None` 表示无限等待。
pub async fn wait_bounded(child: &mut Child, timeout: Option<Duration>) -> io::Result<Completion> {
    let Some(limit) = timeout else {
        return child.wait().await.map(Completion::Exited);
    };

    match tokio::time::timeout(limit, child.wait()).await {
        Ok(status) => status.map(Completion::Exited),
        Err(_) => {
            child.kill().await?;
            Ok(Completion::TimedOut)
        }
    }
}

/// Spawns a command, captures its stdout and stderr.
/// The output streams are drained concurrently as bytes and combined into a
/// single string; invalid UTF-8 is replaced, never fatal.
/// Stdin is left as configured by the caller.
///
/// # Returns
/// A tuple containing:
/// - How the process ended, wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 输出流以字节形式被并发读取并合并到一个字符串中；无效的 UTF-8 会被替换，不会导致失败。
/// 标准输入保持调用者的配置。
pub async fn spawn_and_capture(
    mut cmd: Command,
    timeout: Option<Duration>,
) -> (io::Result<Completion>, String) {
    let mut child = match cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(io::Error::other(t!("command.capture_failed").to_string())),
            String::new(),
        );
    };

    // Both reader tasks append to the same buffer.
    let output = Arc::new(Mutex::new(Vec::new()));
    let stdout_handle = tokio::spawn(drain(stdout, Arc::clone(&output)));
    let stderr_handle = tokio::spawn(drain(stderr, Arc::clone(&output)));

    let completion = wait_bounded(&mut child, timeout).await;

    if matches!(completion, Ok(Completion::TimedOut)) {
        // Grandchildren may still hold the pipes open.
        stdout_handle.abort();
        stderr_handle.abort();
    } else {
        if let Err(e) = stdout_handle.await {
            eprintln!("Failed to join stdout task: {}", e);
        }
        if let Err(e) = stderr_handle.await {
            eprintln!("Failed to join stderr task: {}", e);
        }
    }

    let captured = String::from_utf8_lossy(&output.lock().await).into_owned();
    (completion, captured)
}

/// Reads `reader` to EOF as raw bytes, so the collaborator never sees a
/// closed pipe because of what it printed.
async fn drain<R: AsyncRead + Unpin>(mut reader: R, sink: Arc<Mutex<Vec<u8>>>) {
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => sink.lock().await.extend_from_slice(&buf[..n]),
        }
    }
}
