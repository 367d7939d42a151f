//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Golden Runner:
//! configuration, data models, case discovery, the per-case pipeline
//! and the run summary.
//!
//! 此模块包含 Golden Runner 的核心功能：
//! 配置、数据模型、用例发现、单用例流水线和运行摘要。

pub mod config;
pub mod discovery;
pub mod error;
pub mod execution;
pub mod models;
pub mod summary;

// Re-exports
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use execution::Pipeline;
pub use models::{CaseRecord, Outcome, TestCase};
pub use summary::RunSummary;
