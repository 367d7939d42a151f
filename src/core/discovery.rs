//! # Case Discovery Module / 用例发现模块
//!
//! Lists the immediate subdirectories of the test root; each one is a case.
//!
//! The order is whatever the file system returns from `read_dir`, which is
//! not guaranteed to be sorted or stable across platforms. Use
//! [`sort_cases`] (or `sort_cases = true` in the config) for a canonical order.
//!
//! 列出测试根目录的直接子目录；每个子目录都是一个用例。
//! 顺序由文件系统的 `read_dir` 决定，不保证有序。

use std::fs;
use std::path::Path;

use crate::core::config::CaseLayout;
use crate::core::error::HarnessError;
use crate::core::models::TestCase;

/// Discovers every case under `root`, one per immediate subdirectory.
///
/// Plain files in the root are ignored. Fails with a discovery error when the
/// root is missing, is not a directory, or cannot be listed. Read-only.
///
/// 发现 `root` 下的所有用例，每个直接子目录对应一个。
/// 根目录中的普通文件会被忽略。根目录缺失、不是目录或无法列出时返回发现错误。
pub fn discover_cases(root: &Path, layout: &CaseLayout) -> Result<Vec<TestCase>, HarnessError> {
    if !root.is_dir() {
        return Err(HarnessError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let discovery_error = |source| HarnessError::Discovery {
        path: root.to_path_buf(),
        source,
    };

    let mut cases = Vec::new();
    for entry in fs::read_dir(root).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        let path = entry.path();
        // Follows symlinks, so a linked case directory counts as a case.
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        cases.push(TestCase::new(name, &path, layout));
    }

    Ok(cases)
}

/// Sorts cases by name for a deterministic order.
pub fn sort_cases(cases: &mut [TestCase]) {
    cases.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Splits `cases` into those whose name is in `names` and the requested names
/// that matched nothing. An empty `names` selects everything.
///
/// Selected cases keep their discovery order.
///
/// 将 `cases` 拆分为名称在 `names` 中的用例，以及没有匹配任何用例的请求名称。
/// `names` 为空时选择全部用例。
pub fn select_cases(cases: Vec<TestCase>, names: &[String]) -> (Vec<TestCase>, Vec<String>) {
    if names.is_empty() {
        return (cases, Vec::new());
    }

    let unknown = names
        .iter()
        .filter(|name| !cases.iter().any(|case| &case.name == *name))
        .cloned()
        .collect();
    let selected = cases
        .into_iter()
        .filter(|case| names.contains(&case.name))
        .collect();

    (selected, unknown)
}
