//! # Error Module / 错误模块
//!
//! Typed errors for the report-building core. The CLI layer wraps these in
//! `anyhow` for presentation; the core keeps them typed so callers can tell a
//! malformed input apart from an empty results directory.
//!
//! 报告构建核心的类型化错误。CLI 层使用 `anyhow` 进行包装展示；
//! 核心保持类型化，使调用者能区分输入损坏和结果目录为空两种情况。

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of one report build. Every variant aborts the build before
/// any output file is written.
///
/// 单次报告构建的致命错误。每个变体都会在写出任何输出文件之前中止构建。
#[derive(Debug, Error)]
pub enum ReportError {
    /// A result or container file is not parsable as the expected record.
    /// 某个结果或容器文件无法解析为预期的记录。
    #[error("malformed input file {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No result files were found. Only raised under the strict empty-report
    /// policy (`--fail-if-empty`); the default policy renders a placeholder
    /// page instead.
    /// 未找到任何结果文件。仅在严格空报告策略（`--fail-if-empty`）下抛出；
    /// 默认策略会改为渲染占位页面。
    #[error("no test result files were found in {}", .0.display())]
    NoResults(PathBuf),

    /// The results directory or one of its files could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
