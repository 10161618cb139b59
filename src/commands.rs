//! # Commands Module / 命令模块
//!
//! One module per CLI-level operation.
//!
//! 每个 CLI 级操作对应一个模块。

pub mod generate;
