// Shared test helpers for integration tests
#![allow(dead_code)]

use golden_runner::config::{BUILTIN_COMPARATOR, HarnessConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Stand-in compiler: copies its stdin to the program path given as `$1`
/// and rejects any input containing the word "malformed".
const COMPILER_SCRIPT: &str = r#"#!/bin/sh
cat > "$1"
if grep -q malformed "$1"; then
  rm -f "$1"
  echo "syntax error near 'malformed'" >&2
  exit 1
fi
echo "compiled $1"
"#;

/// A temporary project: a `tests/` case root plus the collaborator scripts.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempdir().expect("Failed to create temporary directory");
        fs::create_dir_all(dir.path().join("tests")).expect("Failed to create tests directory");
        fs::write(dir.path().join("compiler.sh"), COMPILER_SCRIPT)
            .expect("Failed to write compiler script");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("tests")
    }

    /// Adds a case directory with its runtime input and golden output.
    pub fn add_case(&self, name: &str, input: &str, expected: &str) -> PathBuf {
        let case_dir = self.root().join(name);
        fs::create_dir_all(&case_dir).expect("Failed to create case directory");
        fs::write(case_dir.join("test.in"), input).expect("Failed to write test.in");
        fs::write(case_dir.join("test.out"), expected).expect("Failed to write test.out");
        case_dir
    }

    /// A case the stand-in compiler accepts and whose VM output matches.
    pub fn add_passing_case(&self, name: &str) -> PathBuf {
        self.add_case(name, "LOAD 42\nPRINT\n", "LOAD 42\nPRINT\n")
    }

    /// A case the stand-in compiler rejects.
    pub fn add_malformed_case(&self, name: &str) -> PathBuf {
        self.add_case(name, "malformed input\n", "irrelevant\n")
    }

    /// A case whose golden output has one extra trailing newline.
    pub fn add_trailing_newline_case(&self, name: &str) -> PathBuf {
        self.add_case(name, "LOAD 7\n", "LOAD 7\n\n")
    }

    /// Configuration wiring the stand-in compiler, `cat` as the VM and the
    /// system `diff` as the comparator.
    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            tests_dir: self.root(),
            compiler: format!(
                "sh '{}' {{program}}",
                self.path().join("compiler.sh").display()
            ),
            vm: "cat".to_string(),
            ..HarnessConfig::default()
        }
    }

    pub fn builtin_config(&self) -> HarnessConfig {
        HarnessConfig {
            diff: BUILTIN_COMPARATOR.to_string(),
            ..self.config()
        }
    }

    /// Writes `config` as `GoldenRunner.toml` in the workspace and returns its path.
    pub fn write_config(&self, config: &HarnessConfig) -> PathBuf {
        let path = self.path().join("GoldenRunner.toml");
        let content = config.to_toml_string().expect("Failed to serialize config");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}
