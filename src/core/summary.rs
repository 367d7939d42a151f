//! # Run Summary Module / 运行摘要模块
//!
//! `RunSummary` is a plain value folded from the ordered sequence of
//! [`CaseRecord`]s. It is only read once every case has been recorded.
//!
//! `RunSummary` 是由有序的 [`CaseRecord`] 序列折叠而成的普通值。
//! 只有在记录完所有用例之后才会被读取。

use serde::Serialize;

use crate::core::models::{CaseRecord, Outcome};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of cases selected for the run / 本次运行选择的用例数
    pub total: usize,
    /// Number of cases with `Outcome::Passed` / 通过的用例数
    pub passed: usize,
    /// Cases that failed to compile, in recording order / 编译失败的用例，按记录顺序
    pub compile_failed: Vec<String>,
    /// Cases whose output differed, in recording order / 输出不一致的用例，按记录顺序
    pub runtime_mismatch: Vec<String>,
    /// Every record, in processing order / 所有记录，按处理顺序
    pub records: Vec<CaseRecord>,
}

impl RunSummary {
    /// An empty summary for a run over `total` cases.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Folds an ordered sequence of records into a summary.
    pub fn from_records<I>(total: usize, records: I) -> Self
    where
        I: IntoIterator<Item = CaseRecord>,
    {
        records
            .into_iter()
            .fold(Self::new(total), |summary, record| summary.with(record))
    }

    /// Returns the summary extended by one record.
    pub fn with(mut self, record: CaseRecord) -> Self {
        self.record(record);
        self
    }

    /// Adds one record to exactly one bucket.
    pub fn record(&mut self, record: CaseRecord) {
        match record.outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::CompileFailed => self.compile_failed.push(record.name.clone()),
            Outcome::RuntimeMismatch => self.runtime_mismatch.push(record.name.clone()),
        }
        self.records.push(record);
    }

    /// Number of cases recorded so far.
    pub fn recorded(&self) -> usize {
        self.passed + self.compile_failed.len() + self.runtime_mismatch.len()
    }

    /// True once every selected case has exactly one outcome.
    pub fn is_complete(&self) -> bool {
        self.recorded() == self.total
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn outcome_of(&self, name: &str) -> Option<Outcome> {
        self.records
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(name: &str, outcome: Outcome) -> CaseRecord {
        CaseRecord::new(name, outcome, Duration::ZERO)
    }

    #[test]
    fn buckets_keep_recording_order() {
        let summary = RunSummary::from_records(
            5,
            vec![
                record("e", Outcome::RuntimeMismatch),
                record("a", Outcome::CompileFailed),
                record("d", Outcome::Passed),
                record("c", Outcome::RuntimeMismatch),
                record("b", Outcome::CompileFailed),
            ],
        );

        assert_eq!(summary.passed, 1);
        assert_eq!(summary.compile_failed, ["a", "b"]);
        assert_eq!(summary.runtime_mismatch, ["e", "c"]);
        assert!(summary.is_complete());
        assert!(!summary.all_passed());
        assert_eq!(summary.outcome_of("c"), Some(Outcome::RuntimeMismatch));
    }

    #[test]
    fn empty_run_is_complete_and_passed() {
        let summary = RunSummary::from_records(0, Vec::new());
        assert!(summary.is_complete());
        assert!(summary.all_passed());
        assert_eq!(summary.recorded(), 0);
    }

    #[test]
    fn partial_run_is_not_complete() {
        let summary = RunSummary::new(2).with(record("a", Outcome::Passed));
        assert!(!summary.is_complete());
    }
}
