//! # CLI Commands / 命令行命令
//!
//! - `run` - Discover, compile, execute and compare every case
//! - `init` - Write a starter `GoldenRunner.toml`
//!
//! - `run` - 发现、编译、执行并比较每个用例
//! - `init` - 写出初始的 `GoldenRunner.toml`

pub mod init;
pub mod run;
