//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for the case artifacts: clearing stale
//! generated programs, opening the files wired to collaborator stdio, and
//! the in-process exact comparison.
//!
//! 此模块为用例产物提供实用功能：清除过期的生成程序、打开连接到协作进程标准输入输出的文件，
//! 以及进程内精确比较。

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::HarnessError;

/// Removes a file left over from a previous run. A missing file is not an error.
///
/// # Arguments
/// * `path` - Path of the artifact to remove
pub fn remove_stale(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Opens an existing artifact to be used as a collaborator's stdin.
pub fn open_artifact(path: &Path) -> Result<File, HarnessError> {
    File::open(path).map_err(|source| HarnessError::Artifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Creates (or truncates) an artifact that receives a collaborator's output.
pub fn create_artifact(path: &Path) -> Result<File, HarnessError> {
    File::create(path).map_err(|source| HarnessError::Artifact {
        path: path.to_path_buf(),
        source,
    })
}

/// Exact byte comparison of two files, no normalization of line endings or
/// trailing newlines. An unreadable file never matches.
///
/// # Returns
/// `true` if both files can be read and have identical contents
pub async fn contents_match(actual: &Path, expected: &Path) -> bool {
    match tokio::try_join!(tokio::fs::read(actual), tokio::fs::read(expected)) {
        Ok((actual, expected)) => actual == expected,
        Err(_) => false,
    }
}

/// Checks if a path exists and is a regular file.
pub fn is_file(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Gets the absolute path from a potentially relative path, falling back to
/// the path as given when it cannot be resolved.
pub fn display_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removing_a_missing_file_is_fine() {
        let dir = tempdir().unwrap();
        assert!(remove_stale(&dir.path().join("a.frisc")).is_ok());
    }

    #[test]
    fn removing_an_existing_file_deletes_it() {
        let dir = tempdir().unwrap();
        let program = dir.path().join("a.frisc");
        fs::write(&program, "HALT").unwrap();

        remove_stale(&program).unwrap();
        assert!(!program.exists());
    }

    #[tokio::test]
    async fn comparison_is_exact() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let c = dir.path().join("c");
        fs::write(&a, "42\n").unwrap();
        fs::write(&b, "42\n").unwrap();
        fs::write(&c, "42").unwrap();

        assert!(contents_match(&a, &b).await);
        assert!(!contents_match(&a, &c).await);
        assert!(!contents_match(&a, &dir.path().join("missing")).await);
    }
}
